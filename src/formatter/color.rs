use owo_colors::OwoColorize;

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ColorSetting {
    /// Color when writing to a terminal.
    #[default]
    Automatic,
    Always,
    Never,
}

impl ColorSetting {
    pub fn enabled(self, terminal: bool) -> bool {
        match self {
            ColorSetting::Automatic => terminal,
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Paint {
    Ok,
    Failed,
    Warn,
    Dim,
}

impl Paint {
    /// Render `text` in this color if `enabled`.
    pub(crate) fn apply(self, text: &str, enabled: bool) -> String {
        if !enabled {
            return text.to_string();
        }

        match self {
            Paint::Ok => text.green().to_string(),
            Paint::Failed => text.red().to_string(),
            Paint::Warn => text.yellow().to_string(),
            Paint::Dim => text.dimmed().to_string(),
        }
    }
}
