use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(14, 16, 20);
pub const BG_BAR: Color = Color::Rgb(20, 24, 30);
pub const BG_HIGHLIGHT: Color = Color::Rgb(34, 44, 56);

// Primary accent
pub const GREEN: Color = Color::Rgb(0, 176, 128);
pub const GREEN_DIM: Color = Color::Rgb(0, 110, 82);

// Text
pub const TEXT: Color = Color::Rgb(222, 226, 230);
pub const TEXT_DIM: Color = Color::Rgb(135, 142, 152);
pub const TEXT_MUTED: Color = Color::Rgb(84, 92, 104);

// Semantic
pub const BLUE: Color = Color::Rgb(96, 165, 250);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const YELLOW: Color = Color::Rgb(251, 191, 36);
pub const CYAN: Color = Color::Rgb(103, 232, 249);
