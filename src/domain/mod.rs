pub mod activity;
pub mod dashboard;
pub mod goal;
pub mod group;
pub mod health;
pub mod member;
