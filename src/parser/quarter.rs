use crate::constants::QUARTER_SLOTS;
use crate::types::{QuarterGrid, Term};

/// Builds a grid from the 20 quarter cells of a row. Blank or non-numeric
/// cells count as zero hours; missing trailing cells do too.
pub fn grid_from_cells<S: AsRef<str>>(cells: &[S]) -> QuarterGrid {
    let mut slots = [0u32; QUARTER_SLOTS];
    for (slot, cell) in slots.iter_mut().zip(cells) {
        *slot = parse_hours(cell.as_ref());
    }
    QuarterGrid(slots)
}

/// Reads the leading digits of a cell ("2", " 30 ", "2単位"). Anything without
/// leading digits, including negative numbers, is 0.
pub fn parse_hours(text: &str) -> u32 {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Grade of the course: 1 + index of the first grade group with any hours,
/// or 0 if the grid is empty.
pub fn decode_grade(grid: &QuarterGrid) -> u8 {
    grid.groups()
        .position(|group| group.iter().any(|&q| q > 0))
        .map(|index| index as u8 + 1)
        .unwrap_or(0)
}

/// Term within `grade`, from that grade's four quarters only.
///
/// Quarters 1Q/2Q are the first half, 3Q/4Q the second. Hours in both
/// halves, or none at all, mean a full-year course.
pub fn decode_term(grid: &QuarterGrid, grade: u8) -> Term {
    let Some(group) = grid.group(grade) else {
        return Term::FullYear;
    };
    let has_front = group[0] > 0 || group[1] > 0;
    let has_back = group[2] > 0 || group[3] > 0;

    match (has_front, has_back) {
        (true, false) => Term::FirstHalf,
        (false, true) => Term::SecondHalf,
        _ => Term::FullYear,
    }
}

/// Grade and term placement of a course. Undecodable grids give grade 0.
pub fn decode(grid: &QuarterGrid) -> (u8, Term) {
    let grade = decode_grade(grid);
    (grade, decode_term(grid, grade))
}
