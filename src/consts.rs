// Default output path for the command line renderer
pub const OUT_FILE: &str = "./out.ppm";

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Offset along the surface normal for shadow ray origins ("over points")
pub const SHADOW_BIAS: f64 = 0.0001;

// PPM lines may not exceed this many characters
pub const PPM_LINE_WIDTH: usize = 70;
