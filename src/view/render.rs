// src/view/render.rs
use std::fmt;

/// Width of the framed block, borders included.
pub const VIEW_WIDTH: usize = 60;

/// One frame of the status view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub title: String,
    pub subtitle: String,
    pub badge: &'static str,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = VIEW_WIDTH - 2;
        let border = format!("+{}+", "-".repeat(inner));
        let blank = format!("|{}|", " ".repeat(inner));

        writeln!(f, "{border}")?;
        writeln!(f, "{blank}")?;
        for line in [self.title.as_str(), self.subtitle.as_str(), self.badge] {
            writeln!(f, "|{}|", center(line, inner))?;
        }
        writeln!(f, "{blank}")?;
        write!(f, "{border}")
    }
}

fn center(text: &str, width: usize) -> String {
    let text: String = text.chars().take(width).collect();
    let len = text.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(badge: &'static str) -> Rendered {
        Rendered {
            title: "Super Simple App BoilerPlate".into(),
            subtitle: "Here is a cool color".into(),
            badge,
        }
    }

    #[test]
    fn frame_has_fixed_width() {
        let out = sample("Backend Status: Running").to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|l| l.chars().count() == VIEW_WIDTH));
    }

    #[test]
    fn lines_are_centered_in_order() {
        let out = sample("Backend Status: Not Running").to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2].trim_matches('|').trim(), "Super Simple App BoilerPlate");
        assert_eq!(lines[3].trim_matches('|').trim(), "Here is a cool color");
        assert_eq!(lines[4].trim_matches('|').trim(), "Backend Status: Not Running");
    }

    #[test]
    fn long_text_is_truncated() {
        let long = "x".repeat(100);
        assert_eq!(center(&long, 10), "x".repeat(10));
        assert_eq!(center("ab", 6), "  ab  ");
    }
}
