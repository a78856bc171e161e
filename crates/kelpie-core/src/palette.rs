//! Fixed color palette for entity visuals.
//!
//! Colors are assigned by entity index at population creation and never change afterwards.

pub const PALETTE: [&str; 10] = [
    "#6366f1", // indigo
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#f59e0b", // amber
    "#10b981", // emerald
    "#06b6d4", // cyan
    "#f43f5e", // rose
    "#84cc16", // lime
    "#3b82f6", // blue
    "#a855f7", // purple
];

pub fn color_for_index(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
