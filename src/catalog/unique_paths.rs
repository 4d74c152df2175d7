//! Unique grid paths, filled as a DP table

use crate::constants::MAX_GRID_DIM;
use crate::step::{Highlight, Variables};
use crate::trace::{TraceGenerator, TraceRecorder};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridInput {
    pub rows: i64,
    pub cols: i64,
}

impl Default for GridInput {
    fn default() -> Self {
        GridInput { rows: 3, cols: 4 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UniquePaths;

impl TraceGenerator for UniquePaths {
    type Input = GridInput;

    fn name(&self) -> &'static str {
        "unique-paths"
    }

    fn record(&self, input: &GridInput, rec: &mut TraceRecorder) {
        if input.rows <= 0 || input.cols <= 0 {
            rec.emit(
                format!(
                    "A {} x {} grid has no cells, so there is nothing to walk",
                    input.rows, input.cols
                ),
                &Vec::<Vec<i64>>::new(),
                Variables::new(),
            );
            return;
        }

        let rows = input.rows.min(MAX_GRID_DIM) as usize;
        let cols = input.cols.min(MAX_GRID_DIM) as usize;
        let mut dp = vec![vec![0i64; cols]; rows];

        let intro = if (rows as i64, cols as i64) != (input.rows, input.cols) {
            format!(
                "Grid clamped to {} x {}; count paths moving only right or down",
                rows, cols
            )
        } else {
            format!(
                "Count paths through a {} x {} grid moving only right or down",
                rows, cols
            )
        };
        rec.emit(
            intro,
            &dp,
            Variables::new().with("rows", rows).with("cols", cols),
        );

        for cell in dp[0].iter_mut() {
            *cell = 1;
        }
        rec.emit_highlighted(
            "First row: only one way to reach each cell, straight along the edge",
            &dp,
            Variables::new().with("rows", rows).with("cols", cols),
            Highlight::cells((0..cols).map(|c| (0, c))),
        );

        if rows > 1 {
            for row in dp.iter_mut().skip(1) {
                row[0] = 1;
            }
            rec.emit_highlighted(
                "First column: only one way down the edge as well",
                &dp,
                Variables::new().with("rows", rows).with("cols", cols),
                Highlight::cells((0..rows).map(|r| (r, 0))),
            );
        }

        for r in 1..rows {
            for c in 1..cols {
                let (up, left) = (dp[r - 1][c], dp[r][c - 1]);
                dp[r][c] = up + left;
                rec.emit_highlighted(
                    format!(
                        "dp[{}][{}] = from above {} + from the left {} = {}",
                        r,
                        c,
                        up,
                        left,
                        dp[r][c]
                    ),
                    &dp,
                    Variables::new()
                        .with("r", r)
                        .with("c", c)
                        .with("up", up)
                        .with("left", left),
                    Highlight::cells([(r - 1, c), (r, c - 1), (r, c)]),
                );
            }
        }

        let answer = dp[rows - 1][cols - 1];
        rec.emit_highlighted(
            format!("{} distinct path(s) reach the bottom-right corner", answer),
            &dp,
            Variables::new().with("result", answer),
            Highlight::cells([(rows - 1, cols - 1)]),
        );
    }
}
