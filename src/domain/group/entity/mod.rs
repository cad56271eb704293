pub mod member_group;
