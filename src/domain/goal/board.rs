//! 4x4 만다라트 보드 배치
//!
//! ```text
//!  0  1 |  2  3
//!  4  5 |  6  7
//! ------+------
//!  8  9 | 10 11
//! 12 13 | 14 15
//! ```
//!
//! 가운데 네 칸(5, 6, 9, 10)은 카테고리 제목 칸이고, 나머지는 카테고리별 목표 3칸입니다.

use chrono::NaiveDateTime;

use super::dto::{BoardCell, CategoryTitles, CellType};
use super::entity::goal::GoalCategory;
use super::progress::category_progress;

pub const BOARD_SIZE: usize = 16;

/// 카테고리 하나의 칸 배치
#[derive(Debug, Clone, Copy)]
pub struct CategoryLayout {
    pub category: GoalCategory,
    /// 보드 중심에 가장 가까운 제목 칸
    pub title_index: usize,
    /// slot 0, 1, 2 순서의 목표 칸
    pub goal_indices: [usize; 3],
}

pub const CATEGORY_LAYOUT: [CategoryLayout; 4] = [
    CategoryLayout {
        category: GoalCategory::Cat1,
        title_index: 5,
        goal_indices: [0, 1, 4],
    },
    CategoryLayout {
        category: GoalCategory::Cat2,
        title_index: 6,
        goal_indices: [2, 3, 7],
    },
    CategoryLayout {
        category: GoalCategory::Cat3,
        title_index: 9,
        goal_indices: [8, 12, 13],
    },
    CategoryLayout {
        category: GoalCategory::Cat4,
        title_index: 10,
        goal_indices: [11, 14, 15],
    },
];

/// 보드 배치에 필요한 목표 요약
#[derive(Debug, Clone)]
pub struct BoardGoal {
    pub goal_id: i64,
    pub category: GoalCategory,
    pub slot_index: i32,
    pub title: String,
    pub progress: i32,
    pub plan_count: usize,
    pub cheer_count: usize,
    pub has_unread_cheers: bool,
}

/// 목표 목록을 16칸 보드로 배치합니다.
///
/// 슬롯 범위(0~2)를 벗어나거나 `main` 카테고리인 목표는 배치하지 않습니다.
pub fn build_board(goals: &[BoardGoal], titles: &CategoryTitles) -> Vec<BoardCell> {
    let mut cells: Vec<Option<BoardCell>> = vec![None; BOARD_SIZE];

    for layout in CATEGORY_LAYOUT.iter() {
        let category_goals: Vec<&BoardGoal> = goals
            .iter()
            .filter(|g| g.category == layout.category)
            .collect();

        cells[layout.title_index] = Some(BoardCell {
            index: layout.title_index,
            cell_type: CellType::Category,
            category: layout.category,
            slot_index: None,
            goal_id: None,
            title: titles.get(layout.category).to_string(),
            progress: category_progress(category_goals.iter().map(|g| g.progress)),
            plan_count: 0,
            cheer_count: 0,
            has_unread_cheers: false,
        });

        for (slot, &grid_index) in layout.goal_indices.iter().enumerate() {
            let slot = slot as i32;
            let cell = match category_goals.iter().find(|g| g.slot_index == slot) {
                Some(goal) => BoardCell {
                    index: grid_index,
                    cell_type: CellType::Goal,
                    category: layout.category,
                    slot_index: Some(slot),
                    goal_id: Some(goal.goal_id),
                    title: goal.title.clone(),
                    progress: goal.progress,
                    plan_count: goal.plan_count,
                    cheer_count: goal.cheer_count,
                    has_unread_cheers: goal.has_unread_cheers,
                },
                None => BoardCell {
                    index: grid_index,
                    cell_type: CellType::EmptyGoal,
                    category: layout.category,
                    slot_index: Some(slot),
                    goal_id: None,
                    title: String::new(),
                    progress: 0,
                    plan_count: 0,
                    cheer_count: 0,
                    has_unread_cheers: false,
                },
            };
            cells[grid_index] = Some(cell);
        }
    }

    // 배치 표가 16칸을 모두 덮으므로 None은 남지 않는다
    cells.into_iter().flatten().collect()
}

/// 소유자 기준 읽지 않은 응원이 있는지 판단합니다.
///
/// 조회자가 목표 주인이 아니면 항상 false입니다. 본인이 남긴 댓글은 제외하고,
/// 마지막 조회 시각 이후 작성된 댓글이 하나라도 있으면 true입니다.
pub fn has_unread_cheers<'a, I>(
    owner_id: i64,
    viewer_id: Option<i64>,
    last_viewed_at: Option<NaiveDateTime>,
    cheers: I,
) -> bool
where
    I: IntoIterator<Item = (i64, &'a NaiveDateTime)>,
{
    if viewer_id != Some(owner_id) {
        return false;
    }

    cheers.into_iter().any(|(author_id, created_at)| {
        author_id != owner_id && last_viewed_at.map_or(true, |viewed| *created_at > viewed)
    })
}
