/// Rounded device frame around a scaled screenshot.
pub mod frame;
/// Eased vertical gradient and accent glow band.
pub mod gradient;
/// Rounded-rectangle masks and fills.
pub mod shapes;
