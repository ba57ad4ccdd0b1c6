//! Color assignment for layout nodes.
//!
//! Precedence, highest first: explicit override, category, status, kind
//! palette, neutral gray. Several of these may be set on the same node.

use crate::{
    color::Rgb,
    hierarchy::{Category, KindTag, Status},
};

pub const NEUTRAL_GRAY: Rgb = Rgb::new(156, 163, 175);

/// The inputs the policy looks at, borrowed from a layout or source node.
#[derive(Clone, Copy, Debug)]
pub struct ColorKey {
    pub color: Option<Rgb>,
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub kind: KindTag,
}

pub fn category_color(category: Category) -> Rgb {
    match category {
        Category::AboveLpcd      => Rgb::new( 16, 185, 129),
        Category::BelowLpcd      => Rgb::new(239,  68,  68),
        Category::FullyCompleted => Rgb::new( 34, 197,  94),
        Category::InProgress     => Rgb::new(245, 158,  11),
    }
}

pub fn status_color(status: Status) -> Rgb {
    match status {
        Status::Completed  => Rgb::new( 22, 163,  74),
        Status::InProgress => Rgb::new(249, 115,  22),
        Status::Good       => Rgb::new( 34, 197,  94),
        Status::Warning    => Rgb::new(234, 179,   8),
        Status::Critical   => Rgb::new(220,  38,  38),
    }
}

/// Default palette by kind. The root is never drawn and has no entry.
pub fn kind_color(kind: KindTag) -> Option<Rgb> {
    match kind {
        KindTag::Root               => None,
        KindTag::Region             => Some(Rgb::new( 59, 130, 246)),
        KindTag::Scheme             => Some(Rgb::new(139,  92, 246)),
        KindTag::Village            => Some(Rgb::new( 20, 184, 166)),
        KindTag::CompletionCategory => Some(Rgb::new( 99, 102, 241)),
        KindTag::LpcdCategory       => Some(Rgb::new( 14, 165, 233)),
    }
}

/// Resolve the display color of a node.
pub fn color(key: &ColorKey) -> Rgb {
    key.color
        .or_else(|| key.category.map(category_color))
        .or_else(|| key.status.map(status_color))
        .or_else(|| kind_color(key.kind))
        .unwrap_or(NEUTRAL_GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(kind: KindTag) -> ColorKey {
        ColorKey { color: None, category: None, status: None, kind }
    }

    #[test]
    fn override_beats_everything() {
        let pink = Rgb::new(255, 0, 255);
        let k = ColorKey {
            color: Some(pink),
            category: Some(Category::BelowLpcd),
            status: Some(Status::Critical),
            kind: KindTag::Village,
        };
        assert_eq!(color(&k), pink);
    }

    #[test]
    fn category_beats_status_beats_kind() {
        let mut k = key(KindTag::Scheme);
        assert_eq!(color(&k), kind_color(KindTag::Scheme).unwrap());

        k.status = Some(Status::Completed);
        assert_eq!(color(&k), status_color(Status::Completed));

        k.category = Some(Category::AboveLpcd);
        assert_eq!(color(&k), category_color(Category::AboveLpcd));
    }

    #[test]
    fn root_falls_back_to_gray() {
        assert_eq!(color(&key(KindTag::Root)), NEUTRAL_GRAY);
    }

    #[test]
    fn policy_is_deterministic() {
        let k = ColorKey { status: Some(Status::Warning), ..key(KindTag::Village) };
        assert_eq!(color(&k), color(&k));
    }
}
