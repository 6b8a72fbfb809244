// Copyright 2020 @TwoCookingMice

pub mod bitmap;
pub mod constants;
pub mod frame;
pub mod ray;
pub mod spectrum;
pub mod warp;
