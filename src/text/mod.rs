/// Line placement and glyph drawing.
pub mod engine;
/// Font descriptors and resolvers.
pub mod fonts;
