//! Theme module for dashboard color palettes.
//!
//! The header and borders change tone with the dashboard phase:
//! - Loading (blue tones): loading services or usage
//! - Ready (green tones): usage rendered, services listed, idle
//! - Error (red tones): the last fetch failed
//!
//! Series and category colors stay the same in every theme so charts read
//! consistently while a reload is in progress.

use crate::dashboard::DashboardPhase;
use ratatui::style::Color;

/// Category colors, applied in breakdown order and cycled when exhausted.
pub const CATEGORY_PALETTE: [Color; 5] = [
    Color::Rgb(37, 99, 235),  // Blue
    Color::Rgb(16, 185, 129), // Emerald
    Color::Rgb(245, 158, 11), // Amber
    Color::Rgb(239, 68, 68),  // Red
    Color::Rgb(139, 92, 246), // Violet
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePhase {
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    // === Primary colors ===
    pub text: Color,
    pub muted: Color,
    pub accent: Color,

    // === Border colors ===
    pub border: Color,
    pub border_focused: Color,

    // === Semantic colors (consistent across themes) ===
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    /// Header background behind the phase label.
    pub phase_bg: Color,

    // === Chart colors (consistent across themes) ===
    pub bot_series: Color,
    pub api_series: Color,
    pub incoming: Color,
    pub outgoing: Color,
}

impl Theme {
    fn base() -> Self {
        Self {
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Rgb(100, 180, 255),
            border: Color::Rgb(60, 100, 160),
            border_focused: Color::Rgb(130, 200, 255),
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            phase_bg: Color::Rgb(20, 60, 120),
            bot_series: Color::Rgb(37, 99, 235),
            api_series: Color::Rgb(16, 185, 129),
            incoming: Color::Rgb(100, 180, 255),
            outgoing: Color::Rgb(150, 255, 150),
        }
    }

    /// Blue-toned theme while a fetch is outstanding.
    pub fn loading() -> Self {
        Self::base()
    }

    /// Green-toned theme once data is on screen.
    pub fn ready() -> Self {
        Self {
            accent: Color::Rgb(100, 220, 100),       // Bright green
            border: Color::Rgb(40, 120, 60),         // Forest green
            border_focused: Color::Rgb(150, 255, 150), // Light green
            phase_bg: Color::Rgb(20, 80, 40),        // Deep green
            ..Self::base()
        }
    }

    /// Red-toned theme after a failed fetch.
    pub fn error() -> Self {
        Self {
            accent: Color::Rgb(255, 120, 120),
            border: Color::Rgb(150, 50, 50),
            border_focused: Color::Rgb(255, 150, 150),
            phase_bg: Color::Rgb(120, 30, 30), // Dark red
            ..Self::base()
        }
    }

    pub fn phase_for(phase: DashboardPhase) -> ThemePhase {
        match phase {
            DashboardPhase::LoadingServices | DashboardPhase::LoadingUsage => ThemePhase::Loading,
            DashboardPhase::Error => ThemePhase::Error,
            DashboardPhase::Idle | DashboardPhase::ServicesLoaded | DashboardPhase::UsageLoaded => {
                ThemePhase::Ready
            }
        }
    }

    pub fn for_phase(phase: DashboardPhase) -> Self {
        match Self::phase_for(phase) {
            ThemePhase::Loading => Self::loading(),
            ThemePhase::Ready => Self::ready(),
            ThemePhase::Error => Self::error(),
        }
    }

    pub fn category_color(index: usize) -> Color {
        CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
    }
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
