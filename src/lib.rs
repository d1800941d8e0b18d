//! Ragingsea library - shader-displaced water, orbit camera and scene props

pub mod assets;
pub mod camera;
pub mod cli;
pub mod panel;
pub mod params;
pub mod rendering;
pub mod ship;
pub mod water;
