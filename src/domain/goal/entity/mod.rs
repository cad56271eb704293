pub mod goal;
pub mod goal_comment;
pub mod goal_plan;
