// Core utilities shared by engine and game

pub mod math;
