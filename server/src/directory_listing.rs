use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt::Write;
use std::path::{Component, Path, PathBuf};

/// Characters that would end or change the meaning of a relative href.
const HREF_SEGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'#').add(b'?').add(b'%');

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: Option<u64>,
}

/// Maps a request path onto a path relative to the served root.
/// Returns `None` for anything that could step outside the root.
pub fn relative_request_path(request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let mut relative = PathBuf::new();

    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment.contains('\\') {
            return None;
        }

        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => relative.push(name),
            _ => return None,
        }
    }

    Some(relative)
}

pub fn sort_entries(entries: &mut [ListingEntry]) {
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
}

pub fn render_directory_listing(request_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Index of {}", escape_html(request_path));
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<ul>\n"
    );

    if request_path.trim_matches('/') != "" {
        html.push_str("<li><a href=\"../\">../</a></li>\n");
    }

    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        let size = match entry.size {
            Some(bytes) if !entry.is_dir => format!(" ({} bytes)", bytes),
            _ => String::new(),
        };
        let _ = writeln!(
            html,
            "<li><a href=\"{}{}\">{}{}</a>{}</li>",
            escape_html(&encode_href(&entry.name)),
            suffix,
            escape_html(&entry.name),
            suffix,
            size
        );
    }

    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

fn encode_href(name: &str) -> String {
    utf8_percent_encode(name, HREF_SEGMENT).to_string()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            size: if is_dir { None } else { Some(12) },
        }
    }

    #[test]
    fn test_relative_request_path_plain() {
        assert_eq!(relative_request_path("/"), Some(PathBuf::new()));
        assert_eq!(relative_request_path("/assets/css/"), Some(PathBuf::from("assets").join("css")));
        assert_eq!(relative_request_path("/./assets//x"), Some(PathBuf::from("assets").join("x")));
    }

    #[test]
    fn test_relative_request_path_decodes_percent() {
        assert_eq!(relative_request_path("/my%20dir/"), Some(PathBuf::from("my dir")));
    }

    #[test]
    fn test_relative_request_path_keeps_stray_percent_literal() {
        assert_eq!(relative_request_path("/100%zz"), Some(PathBuf::from("100%zz")));
    }

    #[test]
    fn test_relative_request_path_rejects_traversal() {
        assert_eq!(relative_request_path("/../etc"), None);
        assert_eq!(relative_request_path("/a/%2e%2e/b"), None);
        assert_eq!(relative_request_path("/a\\..\\b"), None);
        assert_eq!(relative_request_path("/bad%ff"), None);
    }

    #[test]
    fn test_sort_entries_directories_first() {
        let mut entries = vec![entry("b.js", false), entry("zeta", true), entry("a.css", false), entry("alpha", true)];
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta", "a.css", "b.js"]);
    }

    #[test]
    fn test_render_lists_entries() {
        let html = render_directory_listing("/assets/", &[entry("img", true), entry("style.css", false)]);
        assert!(html.contains("<title>Index of /assets/</title>"));
        assert!(html.contains("<a href=\"../\">../</a>"));
        assert!(html.contains("<a href=\"img/\">img/</a>"));
        assert!(html.contains("<a href=\"style.css\">style.css</a> (12 bytes)"));
    }

    #[test]
    fn test_render_root_has_no_parent_link() {
        let html = render_directory_listing("/", &[entry("index.js", false)]);
        assert!(!html.contains("../"));
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render_directory_listing("/", &[entry("<script>&\"x\" #1.txt", false)]);
        assert!(html.contains("&lt;script&gt;&amp;&quot;x&quot; #1.txt"));
        assert!(html.contains("href=\"&lt;script&gt;&amp;&quot;x&quot;%20%231.txt\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_href_round_trips_through_request_path() {
        let name = "50% off?#café.txt";
        let html = render_directory_listing("/", &[entry(name, false)]);
        assert!(html.contains("href=\"50%25%20off%3F%23caf%C3%A9.txt\""));
        assert_eq!(
            relative_request_path(&format!("/{}", encode_href(name))),
            Some(PathBuf::from(name))
        );
    }
}
