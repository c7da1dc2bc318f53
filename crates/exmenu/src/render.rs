use crate::avatar::AvatarDescriptor;
use crate::geometry::{
    Point, Rect, Sector, badge_rect, hit_test, icon_placement, label_rect, partition_angles,
};
use crate::icon::{BuiltinIcon, IconName, kind_badge};
use crate::item::{ItemIcon, MenuItem};
use crate::params::ParameterStore;
use crate::sync::item_is_active;
use std::iter::zip;

pub const LABEL_HEIGHT: f64 = 20.0;
const ICON_SIZE_DIVISOR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscLayout {
    pub center: Point,
    pub radius: f64,
    pub icon_size: f64,
    pub label_height: f64,
}

impl DiscLayout {
    /// Disc inscribed in the `size` x `size` square at `origin`.
    pub fn square(origin: Point, size: f64) -> Self {
        Self {
            center: Point::new(origin.x + size / 2.0, origin.y + size / 2.0),
            radius: size / 2.0,
            icon_size: size / ICON_SIZE_DIVISOR,
            label_height: LABEL_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Disc,
    Rim,
    Highlight,
    Separator,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IconRef<'a> {
    Builtin(BuiltinIcon),
    Asset(&'a IconName),
}

impl<'a> IconRef<'a> {
    fn for_item(item: &'a MenuItem) -> Self {
        match &item.icon {
            Some(ItemIcon::Builtin(icon)) => Self::Builtin(*icon),
            Some(ItemIcon::Asset(name)) => Self::Asset(name),
            None => Self::Builtin(BuiltinIcon::NoIcon),
        }
    }
}

/// Drawing primitives supplied by the host. Angles follow [`crate::geometry`].
pub trait Canvas {
    type Error;

    fn fill_disc(&mut self, center: Point, radius: f64, paint: Paint) -> Result<(), Self::Error>;
    fn stroke_circle(&mut self, center: Point, radius: f64, paint: Paint)
    -> Result<(), Self::Error>;
    fn fill_sector(
        &mut self,
        center: Point,
        radius: f64,
        start: f64,
        span: f64,
        paint: Paint,
    ) -> Result<(), Self::Error>;
    fn line(&mut self, from: Point, to: Point, paint: Paint) -> Result<(), Self::Error>;
    fn blit(&mut self, icon: IconRef<'_>, rect: Rect) -> Result<(), Self::Error>;
    fn label(&mut self, text: &str, rect: Rect) -> Result<(), Self::Error>;
}

/// The current level's items and the sectors they occupy.
#[derive(Debug, Clone)]
pub struct Frame {
    pub items: Vec<MenuItem>,
    pub sectors: Vec<Sector>,
}

impl Frame {
    pub fn new(items: Vec<MenuItem>) -> Self {
        let sectors = partition_angles(items.len());
        Self { items, sectors }
    }

    pub fn hit(&self, layout: &DiscLayout, point: Point) -> Option<usize> {
        hit_test(&self.sectors, point, layout.center, layout.radius)
    }
}

pub fn render<C: Canvas, S: ParameterStore + ?Sized>(
    frame: &Frame,
    layout: &DiscLayout,
    hovered: Option<usize>,
    avatar: &AvatarDescriptor,
    store: &S,
    canvas: &mut C,
) -> Result<(), C::Error> {
    let DiscLayout { center, radius, .. } = *layout;
    let count = frame.items.len();

    canvas.fill_disc(center, radius, Paint::Disc)?;
    canvas.stroke_circle(center, radius, Paint::Rim)?;

    if let Some(sector) = hovered.and_then(|i| frame.sectors.get(i)) {
        canvas.fill_sector(center, radius, sector.start, sector.span(), Paint::Highlight)?;
    }

    for (item, sector) in zip(&frame.items, &frame.sectors) {
        canvas.line(center, sector.end_vertex(center, radius), Paint::Separator)?;

        let icon = icon_placement(center, radius, sector.index, count, layout.icon_size);
        canvas.blit(IconRef::for_item(item), icon)?;
        canvas.label(&item.name, label_rect(icon, layout.label_height))?;

        if let Some(badge) = kind_badge(item.kind) {
            canvas.blit(IconRef::Builtin(badge), badge_rect(icon))?;
        }
    }

    // overlays go last so they sit on top of every icon
    for (item, sector) in zip(&frame.items, &frame.sectors) {
        if item_is_active(avatar, item, store) {
            let icon = icon_placement(center, radius, sector.index, count, layout.icon_size);
            canvas.blit(IconRef::Builtin(BuiltinIcon::ToggleActive), icon)?;
        }
    }

    Ok(())
}
