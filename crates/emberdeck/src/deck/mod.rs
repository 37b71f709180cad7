pub mod splitter;

use anyhow::{Context, Result};
use eframe::egui::Color32;
use serde::Deserialize;
use std::cell::Cell;
use std::path::Path;

use crate::theme::parse_hex_color;

const DEMO_DECK: &str = include_str!("demo.md");

#[derive(Debug)]
pub struct Deck {
    pub meta: DeckMeta,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

pub struct Slide {
    pub background: Option<Color32>,
    pub content: SlideContent,
}

/// A slide body is either fixed blocks, or a callback that builds its
/// blocks from the current scroll mode and may ask to change it.
pub enum SlideContent {
    Static(Vec<Block>),
    Dynamic(Box<dyn Fn(&ScrollContext) -> Vec<Block>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    Bullets(Vec<String>),
    /// A button that flips scroll mode.
    ScrollToggle,
}

/// Scroll mode as seen by a dynamic slide. A request made through
/// `set_enabled` is applied by the controller once the callback returns.
#[derive(Debug)]
pub struct ScrollContext {
    enabled: bool,
    toggle_pressed: bool,
    requested: Cell<Option<bool>>,
}

impl ScrollContext {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            toggle_pressed: false,
            requested: Cell::new(None),
        }
    }

    /// Context for the call made after the slide's toggle was clicked.
    pub fn pressed(enabled: bool) -> Self {
        Self {
            toggle_pressed: true,
            ..Self::new(enabled)
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle_pressed(&self) -> bool {
        self.toggle_pressed
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.requested.set(Some(enabled));
    }

    pub fn into_request(self) -> Option<bool> {
        self.requested.into_inner()
    }
}

impl Slide {
    #[cfg(test)]
    pub fn is_dynamic(&self) -> bool {
        matches!(self.content, SlideContent::Dynamic(_))
    }

    pub fn blocks(&self, scroll: &ScrollContext) -> Vec<Block> {
        match &self.content {
            SlideContent::Static(blocks) => blocks.clone(),
            SlideContent::Dynamic(build) => build(scroll),
        }
    }
}

impl std::fmt::Debug for Slide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let content = match &self.content {
            SlideContent::Static(blocks) => format!("Static({} blocks)", blocks.len()),
            SlideContent::Dynamic(_) => "Dynamic".to_string(),
        };
        f.debug_struct("Slide")
            .field("background", &self.background)
            .field("content", &content)
            .finish()
    }
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or("Emberdeck")
    }
}

pub fn load(path: &Path) -> Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let deck = parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    if deck.is_empty() {
        anyhow::bail!("No slides found in {}", path.display());
    }
    tracing::debug!(slides = deck.len(), path = %path.display(), "loaded deck");
    Ok(deck)
}

/// The deck shown when no file is given.
pub fn demo() -> Result<Deck> {
    parse(DEMO_DECK).context("Built-in demo deck is invalid")
}

pub fn parse(content: &str) -> Result<Deck> {
    let (meta, body) = extract_frontmatter(content)?;
    let slides = splitter::split(&body)
        .iter()
        .map(|raw| parse_slide(raw))
        .collect();
    Ok(Deck { meta, slides })
}

/// Split a leading `---` YAML block from the body.
fn extract_frontmatter(content: &str) -> Result<(DeckMeta, String)> {
    let content = content.replace("\r\n", "\n");
    let Some(rest) = content.strip_prefix("---\n") else {
        return Ok((DeckMeta::default(), content));
    };
    let Some(end) = rest.find("\n---") else {
        return Ok((DeckMeta::default(), content));
    };
    let yaml = &rest[..end];
    let after = &rest[end + 4..];
    let body = after.strip_prefix('\n').unwrap_or(after);
    let meta = if yaml.trim().is_empty() {
        DeckMeta::default()
    } else {
        serde_yaml::from_str(yaml).context("Invalid frontmatter")?
    };
    Ok((meta, body.to_string()))
}

fn parse_slide(raw: &str) -> Slide {
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut bullets: Vec<String> = Vec::new();
    let mut background = None;
    let mut scroll_toggle = false;

    fn flush(paragraph: &mut Vec<&str>, bullets: &mut Vec<String>, blocks: &mut Vec<Block>) {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(paragraph.join(" ")));
            paragraph.clear();
        }
        if !bullets.is_empty() {
            blocks.push(Block::Bullets(std::mem::take(bullets)));
        }
    }

    for line in raw.lines() {
        let trimmed = line.trim();

        if let Some((key, value)) = splitter::parse_directive(trimmed) {
            match key {
                "background" => {
                    background = parse_hex_color(value);
                    if background.is_none() {
                        tracing::warn!("ignoring invalid background color: {value}");
                    }
                }
                "scroll-toggle" => scroll_toggle = value == "true",
                _ => tracing::debug!("ignoring unknown directive @{key}"),
            }
            continue;
        }

        if trimmed.is_empty() {
            flush(&mut paragraph, &mut bullets, &mut blocks);
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            flush(&mut paragraph, &mut bullets, &mut blocks);
            blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
            continue;
        }

        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            if !paragraph.is_empty() {
                blocks.push(Block::Paragraph(paragraph.join(" ")));
                paragraph.clear();
            }
            bullets.push(item.trim().to_string());
            continue;
        }

        if !bullets.is_empty() {
            blocks.push(Block::Bullets(std::mem::take(&mut bullets)));
        }
        paragraph.push(trimmed);
    }
    flush(&mut paragraph, &mut bullets, &mut blocks);

    let content = if scroll_toggle {
        SlideContent::Dynamic(Box::new(move |scroll: &ScrollContext| {
            if scroll.toggle_pressed() {
                scroll.set_enabled(!scroll.enabled());
            }
            let mut out = blocks.clone();
            let state = if scroll.enabled() { "on" } else { "off" };
            out.push(Block::Paragraph(format!("Scroll mode is {state}.")));
            out.push(Block::ScrollToggle);
            out
        }))
    } else {
        SlideContent::Static(blocks)
    };

    Slide {
        background,
        content,
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let text = line[level..].strip_prefix(' ')?;
    Some((level as u8, text.trim()))
}
