//! 달성률 계산
//!
//! 모든 값은 0 이상이므로 반올림은 0.5 올림(half-up)으로 정수 연산만 사용합니다.

/// 카테고리 하나에 들어가는 목표 칸 수
pub const SLOTS_PER_CATEGORY: i64 = 3;

/// 보드 전체 목표 칸 수 (4 카테고리 x 3 칸)
pub const GOALS_PER_BOARD: i64 = 12;

/// `round(numerator / denominator)`, half-up
fn round_div(numerator: i64, denominator: i64) -> i32 {
    if denominator <= 0 {
        return 0;
    }
    ((2 * numerator + denominator) / (2 * denominator)) as i32
}

/// 세부 계획 기준 목표 달성률: `round(100 * completed / total)`, 계획이 없으면 0
pub fn plan_progress(completed: usize, total: usize) -> i32 {
    round_div(100 * completed as i64, total as i64)
}

/// 카테고리 칸 달성률: 목표 달성률 합을 항상 3칸으로 나눕니다.
pub fn category_progress<I>(goal_progress: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    round_div(sum(goal_progress), SLOTS_PER_CATEGORY)
}

/// 멤버 전체 달성률: 목표 달성률 합을 12칸으로 나눕니다.
pub fn member_progress<I>(goal_progress: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    round_div(sum(goal_progress), GOALS_PER_BOARD)
}

/// 그룹 전체 달성률: 멤버 달성률의 평균, 멤버가 없으면 0
pub fn group_progress(member_progress: &[i32]) -> i32 {
    round_div(
        sum(member_progress.iter().copied()),
        member_progress.len() as i64,
    )
}

fn sum<I>(values: I) -> i64
where
    I: IntoIterator<Item = i32>,
{
    values.into_iter().map(i64::from).sum()
}
