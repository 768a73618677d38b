pub mod sph_vis2d;
