/*!
format.rs

Human output helpers (colors, emoji markers, boxed headers).

  - StyleOptions::detect() honours NO_COLOR / NO_EMOJI
  - color(role, text, &StyleOptions)
  - emoji(tag, &StyleOptions)
  - box_header(title, subtitle, &StyleOptions)

JSON output paths must not use these helpers.
*/

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Success,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",
        Role::Secondary => "38;5;250",
        Role::Success => "38;5;82",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "info" => "ℹ",
        "list" => "≡",
        _ => "",
    }
}

/// Single-line title (plus optional subtitle) inside a light box.
/// Text wider than the terminal is truncated with an ellipsis, dropping the subtitle styling.
pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let title: &str = title.as_ref().trim();
    let sub: Option<&str> = subtitle.as_ref().map(|s| s.as_ref());

    let raw = match sub {
        Some(s) => format!("{title}  {s}"),
        None => title.to_string(),
    };
    let max_inner = style.term_width.saturating_sub(4).max(8);
    let text = truncate_ellipsis(&raw, max_inner);
    let inner = strip_ansi(&text).chars().count();

    let styled = match sub {
        Some(s) if text == raw => format!(
            "{}  {}",
            color(Role::Primary, title, style),
            color(Role::Secondary, s, style)
        ),
        _ => color(Role::Primary, &text, style),
    };

    let bar = "─".repeat(inner + 2);
    format!("┌{bar}┐\n│ {styled} │\n└{bar}┘")
}

/// Remove ANSI SGR sequences (`ESC [ ... m`) for width computations.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            for n in chars.by_ref() {
                if n == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> StyleOptions {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width: 100,
        }
    }

    #[test]
    fn plain_style_has_no_escapes() {
        let style = plain();
        assert_eq!(color(Role::Error, "boom", &style), "boom");
        assert_eq!(emoji("success", &style), "");
    }

    #[test]
    fn box_header_plain_layout() {
        let style = plain();
        let b = box_header("version", Some("code=0"), &style);
        let lines: Vec<&str> = b.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "│ version  code=0 │");
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn colored_subtitle_does_not_widen_box() {
        let style = StyleOptions {
            use_color: true,
            ..plain()
        };
        let b = box_header("reset_mfa failed", Some(color(Role::Error, "boom", &style)), &style);
        let lines: Vec<&str> = b.lines().collect();
        assert_eq!(
            strip_ansi(lines[1]).chars().count(),
            lines[0].chars().count()
        );
    }

    #[test]
    fn markers_are_single_column_glyphs() {
        let style = StyleOptions {
            use_emoji: true,
            ..plain()
        };
        for tag in ["success", "error", "info", "list"] {
            let marker = emoji(tag, &style);
            assert_eq!(marker.chars().count(), 1, "{tag}");
            assert!(marker.chars().all(|c| c < '\u{1F000}'), "{tag} is a wide emoji");
        }
        let b = box_header(
            format!("{} list_channels (2)", emoji("list", &style)),
            None::<&str>,
            &style,
        );
        let lines: Vec<&str> = b.lines().collect();
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_ellipsis("abcdef", 4), "abc…");
        assert_eq!(truncate_ellipsis("abc", 4), "abc");
    }
}
