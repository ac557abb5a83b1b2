pub mod synthetic_terrain;
