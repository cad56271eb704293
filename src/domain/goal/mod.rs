pub mod board;
pub mod dto;
pub mod entity;
pub mod handler;
pub mod progress;
pub mod service;
