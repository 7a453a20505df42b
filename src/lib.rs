//! Storeshots composes App Store marketing slides from raw device screenshots.
//!
//! Each slide stacks, bottom to top: a vertical gradient, an accent glow band, the
//! screenshot inside a rounded device frame, a centered headline and subhead, and a short
//! accent divider. The whole job is described by a [`JobConfig`]:
//!
//! - Build one slide in memory with [`SlideComposer::compose`]
//! - Build and write one slide with [`SlideComposer::build`]
//! - Build a whole job with [`run_batch`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod compose;
pub(crate) mod effects;
pub(crate) mod layout;
/// Gradient, shape and device frame rasterization.
pub mod render;
/// Font resolution and line layout.
pub mod text;

pub use crate::foundation::core::{Rgb8, Rgba8, Surface};
pub use crate::foundation::error::{StoreshotsError, StoreshotsResult};

pub use crate::compose::batch::{BatchReport, SlideReport, missing_sources, run_batch};
pub use crate::compose::config::{
    ACCENT_BLUE, ACCENT_GREEN, ACCENT_ORANGE, ACCENT_PURPLE, ACCENT_RED, ACCENT_TEAL,
    DividerStyle, GRADIENT_BOTTOM, JobConfig, LayoutConfig, SlideSpec, default_slides,
};
pub use crate::compose::slide::{SlideComposer, SlideOutcome};
pub use crate::effects::composite::{PremulRgba8, flatten_to_rgb, over, over_at};
pub use crate::layout::fit::{ScaledImage, fit_within, scale_image};
pub use crate::render::frame::{FrameStyle, device_frame};
pub use crate::render::gradient::{glow_band, vertical_gradient};
pub use crate::render::shapes::{Mask, rounded_mask};
pub use crate::text::engine::{InkSpan, TextBlock, TextLayoutEngine, TextShadow, center_x};
pub use crate::text::fonts::{
    ChainResolver, FileFontResolver, FontDbResolver, FontDescriptor, FontResolver, NoFonts,
    ResolvedFont, default_resolver,
};
