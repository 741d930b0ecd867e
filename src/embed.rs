//! Card-style output shared by the commands.
//!
//! An [`Embed`] holds a title, a lightly marked-up description and a list of
//! fields. It renders either as terminal text (emphasis markers dropped,
//! `[name](url)` links spelled out) or as JSON.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Last.fm red, used for list-style cards.
pub const COLOR_LASTFM: u32 = 0xba0000;
pub const COLOR_WHITE: u32 = 0xFFFFFF;

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("link pattern is valid"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*|\*([^*]+)\*").expect("emphasis pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
}

impl Embed {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            ..Default::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Add a field only when there is a value for it.
    pub fn field_opt(self, name: &str, value: Option<impl Into<String>>, inline: bool) -> Self {
        match value {
            Some(v) => self.field(name, v, inline),
            None => self,
        }
    }

    pub fn image(mut self, url: Option<String>) -> Self {
        self.image = url;
        self
    }

    pub fn thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail = url;
        self
    }

    pub fn author(mut self, name: impl Into<String>, icon_url: Option<String>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            icon_url,
        });
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Card markup as plain terminal text.
pub fn plain_text(markup: &str) -> String {
    let linked = LINK.replace_all(markup, "$1 <$2>");
    EMPHASIS.replace_all(&linked, "$1$2").into_owned()
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(author) = &self.author {
            writeln!(f, "{}", author.name)?;
        }

        write!(f, "== {} ==", self.title)?;
        if let Some(url) = &self.url {
            write!(f, " <{url}>")?;
        }
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "{}", plain_text(&self.description).trim_end())?;
        }

        if !self.fields.is_empty() {
            writeln!(f)?;
        }
        // Consecutive inline fields share a line.
        let mut line: Vec<String> = Vec::new();
        for field in &self.fields {
            let rendered = format!("{}: {}", field.name, plain_text(&field.value));
            if field.inline {
                line.push(rendered);
            } else {
                if !line.is_empty() {
                    writeln!(f, "{}", line.join("  |  "))?;
                    line.clear();
                }
                writeln!(f, "{rendered}")?;
            }
        }
        if !line.is_empty() {
            writeln!(f, "{}", line.join("  |  "))?;
        }

        if let Some(thumbnail) = &self.thumbnail {
            writeln!(f, "Thumbnail: {thumbnail}")?;
        }
        if let Some(image) = &self.image {
            writeln!(f, "Image: {image}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("**Roygbiv**\nby *Boards of Canada*"), "Roygbiv\nby Boards of Canada");
        assert_eq!(
            plain_text("**1.** [Roygbiv](https://last.fm/x) - *Boards of Canada*"),
            "1. Roygbiv <https://last.fm/x> - Boards of Canada"
        );
        assert_eq!(plain_text("3 * 4"), "3 * 4");
    }

    #[test]
    fn test_render_groups_inline_fields() {
        let embed = Embed::new("Profile", COLOR_LASTFM)
            .field("Scrobbles", "1,234", true)
            .field("Artists", "56", true)
            .field("Registered", "14 Nov 2023", false)
            .image(Some("https://img/x.png".to_string()));

        let text = embed.to_string();

        assert!(text.starts_with("== Profile ==\n"));
        assert!(text.contains("Scrobbles: 1,234  |  Artists: 56\nRegistered: 14 Nov 2023\n"));
        assert!(text.ends_with("Image: https://img/x.png\n"));
    }

    #[test]
    fn test_field_opt_skips_none() {
        let embed = Embed::new("x", COLOR_WHITE)
            .field_opt("Album", None::<String>, false)
            .field_opt("YouTube", Some("https://youtu.be/x"), false);

        assert_eq!(embed.fields.len(), 1);
        assert_eq!(embed.fields[0].name, "YouTube");
    }

    #[test]
    fn test_json_omits_empty_parts() {
        let json = Embed::new("Now Playing", COLOR_WHITE).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Now Playing");
        assert_eq!(value["color"], 0xFFFFFF);
        assert!(value.get("fields").is_none());
        assert!(value.get("image").is_none());
    }
}
