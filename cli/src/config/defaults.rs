//! All setting definitions with their default values.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

pub const IMAGES_DIR: &str = "IMAGE_COMPOSER_IMAGES_DIR";
pub const DEFAULT_FOREGROUND: &str = "IMAGE_COMPOSER_DEFAULT_FOREGROUND";
pub const WRAP_CHARS: &str = "IMAGE_COMPOSER_WRAP_CHARS";
pub const LINE_SPACING: &str = "IMAGE_COMPOSER_LINE_SPACING";
pub const FONT_CANDIDATES: &str = "IMAGE_COMPOSER_FONT_CANDIDATES";

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (IMAGES_DIR, "images", "Directory searched for a background image"),
    (
        DEFAULT_FOREGROUND,
        "images/header.png",
        "Foreground used in composite mode when --foreground is omitted",
    ),
    (WRAP_CHARS, "18", "Characters per line before text wraps"),
    (LINE_SPACING, "0.2", "Line gap as a fraction of the tallest line"),
    (
        FONT_CANDIDATES,
        "",
        "Extra font files (OS path list) tried before the platform fonts",
    ),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

impl SettingDef {
    /// Message logged when an environment value for this setting is rejected.
    pub fn rejection_message(&self, value: &str, reason: &str) -> String {
        format!(
            "Ignoring {}={value:?} ({}): {reason}; using {:?}",
            self.key, self.description, self.default
        )
    }
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the definition for a setting key, or `None` if not defined.
pub fn get_def(key: &str) -> Option<&'static SettingDef> {
    DEFAULT_SETTINGS.get(key)
}

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    get_def(key).map(|d| d.default)
}

/// Installed fonts probed, in order, when no font file is given.
pub fn platform_font_candidates() -> Vec<PathBuf> {
    platform_font_paths().iter().map(PathBuf::from).collect()
}

fn platform_font_paths() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/ヒラギノ角ゴシック W6.ttc",
            "/System/Library/Fonts/ヒラギノ明朝 ProN W6.ttc",
            "/System/Library/Fonts/Hiragino Sans W6.ttc",
            "/System/Library/Fonts/Hiragino Mincho ProN W6.ttc",
            "/Library/Fonts/ヒラギノ角ゴシック W6.ttc",
            "/Library/Fonts/Arial Unicode MS.ttf",
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            "C:\\Windows\\Fonts\\YuGothB.ttc",
            "C:\\Windows\\Fonts\\meiryo.ttc",
            "C:\\Windows\\Fonts\\msgothic.ttc",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        ]
    }
}
