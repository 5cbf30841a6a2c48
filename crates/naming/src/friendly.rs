//! Human-readable names: two adjectives, a noun, and a category suffix.

use rand::seq::SliceRandom;
use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Amber", "Ancient", "Arctic", "Azure", "Bold", "Brave", "Bright", "Calm", "Clever", "Cosmic",
    "Crimson", "Curious", "Dapper", "Eager", "Electric", "Emerald", "Fancy", "Fierce", "Gentle",
    "Giant", "Golden", "Happy", "Hidden", "Humble", "Icy", "Jolly", "Lively", "Lucky", "Lunar",
    "Mellow", "Misty", "Noble", "Polar", "Proud", "Quiet", "Rapid", "Royal", "Rusty", "Silent",
    "Silver", "Sleepy", "Solar", "Spicy", "Stormy", "Sunny", "Swift", "Tiny", "Velvet", "Witty",
];

const NOUNS: &[&str] = &[
    "Badger", "Beacon", "Canyon", "Comet", "Condor", "Coral", "Dragon", "Falcon", "Fern", "Fjord",
    "Gecko", "Glacier", "Harbor", "Heron", "Iguana", "Island", "Jaguar", "Kestrel", "Koala",
    "Lantern", "Lynx", "Maple", "Meadow", "Meteor", "Narwhal", "Nebula", "Ocelot", "Orchid",
    "Otter", "Panda", "Pebble", "Pine", "Puffin", "Quasar", "Raven", "Reef", "River", "Salmon",
    "Sparrow", "Summit", "Tiger", "Tundra", "Turtle", "Valley", "Walrus", "Willow", "Yak", "Zebra",
];

/// Broad file category used as the suffix of friendly names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Image,
    Video,
    Audio,
    Text,
    Archive,
    Document,
    File,
}

impl Category {
    /// Classify a file by its extension (with or without the leading dot)
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "svg" | "ico" | "tiff" | "avif"
            | "heic" => Category::Image,
            "mp4" | "mkv" | "webm" | "mov" | "avi" | "m4v" | "flv" => Category::Video,
            "mp3" | "wav" | "flac" | "ogg" | "opus" | "m4a" | "aac" => Category::Audio,
            "txt" | "md" | "log" | "csv" | "json" | "toml" | "yaml" | "yml" | "xml" | "html"
            | "rs" | "go" | "py" | "js" | "ts" | "c" | "h" | "sh" => Category::Text,
            "zip" | "tar" | "gz" | "tgz" | "bz2" | "xz" | "zst" | "7z" | "rar" => Category::Archive,
            "pdf" | "doc" | "docx" | "odt" | "rtf" | "xls" | "xlsx" | "ppt" | "pptx" | "epub" => {
                Category::Document
            }
            _ => Category::File,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Image => "Image",
            Category::Video => "Video",
            Category::Audio => "Audio",
            Category::Text => "Text",
            Category::Archive => "Archive",
            Category::Document => "Document",
            Category::File => "File",
        }
    }
}

/// Generate a friendly identifier such as `SwiftAmberOtterImage`
pub fn friendly_name(extension: &str) -> String {
    let mut rng = rand::thread_rng();
    let first = pick(&mut rng, ADJECTIVES);
    let second = pick(&mut rng, ADJECTIVES);
    let noun = pick(&mut rng, NOUNS);

    format!(
        "{}{}{}{}",
        first,
        second,
        noun,
        Category::from_extension(extension).as_str()
    )
}

fn pick<R: Rng>(rng: &mut R, words: &[&'static str]) -> &'static str {
    // Word lists are non-empty constants
    words.choose(rng).copied().unwrap_or("Plain")
}
