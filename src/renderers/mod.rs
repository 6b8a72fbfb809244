// Copyright @yucwang 2021

pub mod renderer;
pub mod simple;
