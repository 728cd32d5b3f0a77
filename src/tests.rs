#[cfg(test)]
mod tests {
    use unordered_pair::UnorderedPair;

    use crate::extract::extract;
    use crate::grammar::parse;
    use crate::rules::{satisfies_rules, violations, RuleViolation};
    use crate::serialize::to_text;
    use crate::validate::check_contiguity;
    use crate::{Cell, ContiguityError, Location, Puzzle, PuzzleError, StructuralError, SyntaxError};

    // the published 10x10 puzzle the original web client ships with
    const KD_1_1_1: &str = "10x10\n1,2  1,5  | 1,1 1,3 1,4 1,6 1,7 1,8 2,1 2,2 2,3 2,4 2,5 2,6 2,8 3,5\n2,9  4,10 | 1,9 1,10 2,10 3,9 3,10 4,9 5,9 5,10 6,9 6,10 7,10 8,10\n3,2  3,4  | 3,3\n2,7  4,8  | 3,6 3,7 3,8\n6,1  9,1  | 3,1 4,1 4,2 4,3 4,4 5,1 5,2 5,3 6,2 7,1 7,2 8,1 8,2 8,3 8,4 8,5 8,6\n5,4  5,6  | 4,5 5,5 6,4 6,5 6,6\n6,8  8,7  | 4,6 4,7 5,7 5,8 6,7 7,6 7,7 7,8 8,8\n7,3  7,5  | 6,3 7,4\n8,9 10,10 | 7,9 9,9 9,10\n9,3  10,6 | 9,2 9,4 9,5 9,6 9,7 9,8 10,1 10,2 10,3 10,4 10,5 10,7 10,8 10,9\n";

    const KD_REGIONS: [usize; 100] = [
        0, 0, 0, 0, 0, 0, 0, 0, 1, 1,
        0, 0, 0, 0, 0, 0, 3, 0, 1, 1,
        4, 2, 2, 2, 0, 3, 3, 3, 1, 1,
        4, 4, 4, 4, 5, 6, 6, 3, 1, 1,
        4, 4, 4, 5, 5, 5, 6, 6, 1, 1,
        4, 4, 7, 5, 5, 5, 6, 6, 1, 1,
        4, 4, 7, 7, 7, 6, 6, 6, 8, 1,
        4, 4, 4, 4, 4, 4, 6, 6, 8, 1,
        4, 9, 9, 9, 9, 9, 9, 9, 8, 8,
        9, 9, 9, 9, 9, 9, 9, 9, 9, 8,
    ];

    const KD_STARS: [usize; 20] = [1, 4, 16, 18, 21, 23, 37, 39, 43, 45, 50, 57, 62, 64, 76, 78, 80, 82, 95, 99];

    const ONE_REGION_3X3: &str = "3x3\n1,3 | 1,1 1,2 2,1 2,2 2,3 3,1 3,2 3,3\n";

    fn star_indices(board: &[Cell]) -> Vec<usize> {
        board.iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_star())
            .map(|(index, _)| index)
            .collect()
    }

    #[test]
    fn parses_single_region_3x3() {
        let info = extract(&parse(ONE_REGION_3X3).unwrap()).unwrap();
        assert_eq!(info.rows, 3);
        assert_eq!(info.columns, 3);
        assert_eq!(info.regions, vec![0; 9]);
        assert_eq!(star_indices(&info.board), vec![2]);
    }

    #[test]
    fn parses_empty_puzzle() {
        let info = extract(&parse("0x0\n").unwrap()).unwrap();
        assert_eq!(info.rows, 0);
        assert_eq!(info.columns, 0);
        assert!(info.board.is_empty());
        assert!(info.regions.is_empty());
        assert_eq!(info.region_count(), 0);

        let puzzle = Puzzle::blank_from_str("0x0\n").unwrap();
        assert!(puzzle.is_solved());
        assert!(satisfies_rules(&puzzle));
        assert_eq!(puzzle.to_string(), "0x0\n");
    }

    #[test]
    fn parses_starless_rectangular_puzzle() {
        let info = extract(&parse("2x3\n | 1,1 1,2 2,1 2,2 2,3 1,3\n").unwrap()).unwrap();
        assert_eq!(info.rows, 2);
        assert_eq!(info.columns, 3);
        assert_eq!(info.board, vec![Cell::Empty; 6]);
        assert_eq!(info.regions, vec![0; 6]);
    }

    #[test]
    fn parses_kd_fixture() {
        let info = extract(&parse(KD_1_1_1).unwrap()).unwrap();
        assert_eq!(info.rows, 10);
        assert_eq!(info.columns, 10);
        assert_eq!(info.region_count(), 10);
        assert_eq!(info.regions, KD_REGIONS.to_vec());
        assert_eq!(star_indices(&info.board), KD_STARS.to_vec());
    }

    #[test]
    fn spaces_and_tabs_between_tokens_are_insignificant() {
        let padded = "3x3\n\t1,3   |  1,1\t1,2 2,1 2,2\t 2,3 3,1 3,2 3,3\n";
        assert_eq!(
            extract(&parse(padded).unwrap()).unwrap(),
            extract(&parse(ONE_REGION_3X3).unwrap()).unwrap(),
        );
    }

    #[test]
    fn comments_before_the_size_line_are_dropped() {
        let commented = format!("# puzzle kd-1-1-1\n# solved form\n{}", KD_1_1_1);
        let info = extract(&parse(&commented).unwrap()).unwrap();
        assert_eq!(info, extract(&parse(KD_1_1_1).unwrap()).unwrap());
        assert!(!to_text(&info).contains('#'));
    }

    #[test]
    fn comment_after_the_size_line_is_rejected() {
        let result = parse("3x3\n# too late\n1,3 | 1,1 1,2 2,1 2,2 2,3 3,1 3,2 3,3\n");
        assert!(matches!(result, Err(SyntaxError::Expected { .. })));
    }

    #[test]
    fn missing_pipe_is_rejected() {
        let result = parse("3x3\n1,3 1,1 1,2 2,1 2,2 2,3 3,1 3,2 3,3\n");
        assert!(matches!(result, Err(SyntaxError::Expected { .. })));
    }

    #[test]
    fn missing_size_line_is_rejected() {
        assert!(matches!(parse("1,3 | 1,1\n"), Err(SyntaxError::Expected { .. })));
    }

    #[test]
    fn unterminated_input_is_rejected() {
        assert!(matches!(parse("3x3"), Err(SyntaxError::UnexpectedEnd { .. })));
        assert!(matches!(parse("3x3\n1,3 | 1,1"), Err(SyntaxError::UnexpectedEnd { .. })));
    }

    #[test]
    fn stray_bytes_are_rejected() {
        assert_eq!(parse("3x3\r\n"), Err(SyntaxError::UnrecognizedInput { at: 3 }));
        assert!(matches!(parse("3x3\n1,3 * | 1,1\n"), Err(SyntaxError::UnrecognizedInput { .. })));
        // a number too large for the machine is a lexing failure, not a wrap
        assert!(matches!(parse("99999999999999999999999999x3\n"), Err(SyntaxError::UnrecognizedInput { .. })));
    }

    #[test]
    fn duplicate_cell_is_rejected() {
        let result = extract(&parse("2x2\n1,1 | 1,2\n2,1 | 2,2 1,1\n").unwrap());
        assert_eq!(
            result,
            Err(StructuralError::DuplicateCell { row: 1, column: 1, first: 0, second: 1 }),
        );
    }

    #[test]
    fn unassigned_cell_is_rejected() {
        let result = extract(&parse("2x2\n1,1 | 1,2 2,1\n").unwrap());
        assert_eq!(result, Err(StructuralError::UnassignedCell { row: 2, column: 2 }));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let result = extract(&parse("2x2\n1,1 | 1,2 2,1 2,3\n").unwrap());
        assert_eq!(
            result,
            Err(StructuralError::CoordinateOutOfRange { row: 2, column: 3, rows: 2, columns: 2, region: 0 }),
        );

        // coordinates are one-based, so a zero component is out of range too
        let result = extract(&parse("2x2\n | 0,1\n").unwrap());
        assert!(matches!(result, Err(StructuralError::CoordinateOutOfRange { row: 0, column: 1, .. })));
    }

    #[test]
    fn empty_region_line_is_rejected() {
        let result = extract(&parse("2x2\n1,1 1,2 2,1 2,2 | \n | \n").unwrap());
        assert_eq!(result, Err(StructuralError::EmptyRegionLine { region: 1 }));
    }

    #[test]
    fn split_region_is_rejected() {
        // region 0 holds two cells touching only at a corner
        let info = extract(&parse("2x2\n1,1 2,2 | \n | 1,2 2,1\n").unwrap()).unwrap();
        assert_eq!(
            check_contiguity(&info),
            Err(ContiguityError { region: 0, reached: 1, cells: 2 }),
        );
        assert!(matches!(
            Puzzle::solved_from_str("2x2\n1,1 2,2 | \n | 1,2 2,1\n"),
            Err(PuzzleError::Contiguity(_)),
        ));
    }

    #[test]
    fn round_trip_reproduces_the_fixture() {
        let info = extract(&parse(KD_1_1_1).unwrap()).unwrap();
        assert_eq!(extract(&parse(&to_text(&info)).unwrap()).unwrap(), info);
    }

    #[test]
    fn serialization_is_canonical() {
        // scrambled coordinate order within the line
        let scrambled = "3x3\n1,3 | 3,3 1,1 2,2 1,2 2,1 2,3 3,1 3,2\n";
        let info = extract(&parse(scrambled).unwrap()).unwrap();
        assert_eq!(to_text(&info), ONE_REGION_3X3);

        // an already-canonical text reprints byte-identically
        let info = extract(&parse(ONE_REGION_3X3).unwrap()).unwrap();
        assert_eq!(to_text(&info), ONE_REGION_3X3);
    }

    #[test]
    fn region_ids_follow_line_order() {
        // the bottom row is named first, so it becomes region 0
        let info = extract(&parse("2x2\n | 2,1 2,2\n | 1,1 1,2\n").unwrap()).unwrap();
        assert_eq!(info.regions, vec![1, 1, 0, 0]);

        let puzzle = Puzzle::blank_from_str("2x2\n | 2,1 2,2\n | 1,1 1,2\n").unwrap();
        assert_eq!(puzzle.region_at(Location(1, 0)).unwrap(), 0);
        assert_eq!(puzzle.region_at(Location(0, 0)).unwrap(), 1);
    }

    #[test]
    fn solved_factory_carries_its_own_answer() {
        let puzzle = Puzzle::solved_from_str(KD_1_1_1).unwrap();
        assert_eq!(puzzle.rows(), 10);
        assert_eq!(puzzle.columns(), 10);
        assert_eq!(puzzle.star_count(), 20);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn blank_factory_starts_empty_and_solves_by_matching_the_snapshot() {
        let blank = Puzzle::blank_from_str(KD_1_1_1).unwrap();
        assert_eq!(blank.star_count(), 0);
        assert!(!blank.is_solved());

        let filled = KD_STARS.iter().copied().fold(blank, |puzzle, index| {
            puzzle.with_cell(Location(index / 10, index % 10), Cell::Star).unwrap()
        });
        assert!(filled.is_solved());
        assert_eq!(filled, Puzzle::solved_from_str(KD_1_1_1).unwrap());
    }

    #[test]
    fn changing_a_cell_never_touches_the_receiver() {
        let original = Puzzle::solved_from_str(ONE_REGION_3X3).unwrap();
        let changed = original.with_cell(Location(1, 1), Cell::Star).unwrap();

        assert_eq!(original.get(Location(1, 1)).unwrap(), Cell::Empty);
        assert_eq!(changed.get(Location(1, 1)).unwrap(), Cell::Star);
        assert_eq!(original.to_string(), ONE_REGION_3X3);

        let reverted = changed.with_cell(Location(1, 1), Cell::Empty).unwrap();
        assert_eq!(reverted, original);
        assert_eq!(reverted.get(Location(1, 1)).unwrap(), original.get(Location(1, 1)).unwrap());
    }

    #[test]
    fn equality_covers_dims_regions_and_board_only() {
        // same grid and regions, different star placements in the text
        let left = Puzzle::blank_from_str("1x2\n1,1 | 1,2\n").unwrap();
        let right = Puzzle::blank_from_str("1x2\n1,2 | 1,1\n").unwrap();

        // both boards are blank, so the differing snapshots do not matter
        assert_eq!(left, right);
        assert_ne!(
            Puzzle::solved_from_str("1x2\n1,1 | 1,2\n").unwrap(),
            Puzzle::solved_from_str("1x2\n1,2 | 1,1\n").unwrap(),
        );

        // identical text parses to equal puzzles with byte-identical display
        let once = Puzzle::solved_from_str(KD_1_1_1).unwrap();
        let twice = Puzzle::solved_from_str(KD_1_1_1).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn blank_display_leaves_the_star_side_empty() {
        let blank = Puzzle::blank_from_str(ONE_REGION_3X3).unwrap();
        assert_eq!(blank.to_string(), "3x3\n | 1,1 1,2 1,3 2,1 2,2 2,3 3,1 3,2 3,3\n");
    }

    #[test]
    fn out_of_bounds_operations_fail() {
        let puzzle = Puzzle::solved_from_str(ONE_REGION_3X3).unwrap();
        let expected = crate::OutOfBounds { location: Location(3, 0), rows: 3, columns: 3 };

        assert_eq!(puzzle.get(Location(3, 0)), Err(expected));
        assert_eq!(puzzle.region_at(Location(3, 0)), Err(expected));
        assert_eq!(puzzle.with_cell(Location(3, 0), Cell::Star).unwrap_err(), expected);
        assert!(puzzle.get(Location(0, 3)).is_err());
    }

    #[test]
    fn rules_accept_the_solved_fixture() {
        let puzzle = Puzzle::solved_from_str(KD_1_1_1).unwrap();
        assert!(satisfies_rules(&puzzle));
    }

    #[test]
    fn rules_count_stars_without_consulting_the_snapshot() {
        let blank = Puzzle::blank_from_str(KD_1_1_1).unwrap();
        let found = violations(&blank);

        // every row, column, and region is short of stars; nothing is adjacent
        assert_eq!(found.len(), 30);
        assert!(found.contains(&RuleViolation::RowCount { row: 0, stars: 0 }));
        assert!(found.contains(&RuleViolation::ColumnCount { column: 9, stars: 0 }));
        assert!(found.contains(&RuleViolation::RegionCount { region: 4, stars: 0 }));
    }

    #[test]
    fn rules_flag_touching_stars() {
        let puzzle = Puzzle::blank_from_str(KD_1_1_1).unwrap()
            .with_cell(Location(0, 0), Cell::Star).unwrap()
            .with_cell(Location(1, 1), Cell::Star).unwrap();

        let adjacent = RuleViolation::AdjacentStars {
            cells: UnorderedPair::from((Location(0, 0), Location(1, 1))),
        };
        assert!(violations(&puzzle).contains(&adjacent));
        assert!(!satisfies_rules(&puzzle));
    }

    mod round_trip {
        use proptest::prelude::*;

        use crate::extract::{extract, PuzzleInfo};
        use crate::grammar::parse;
        use crate::serialize::to_text;
        use crate::Cell;

        proptest! {
            // row-strip partitions are always complete and contiguous, so any
            // star scattering over them must survive the round trip
            #[test]
            fn row_strip_infos_survive_the_round_trip(
                rows in 1usize..8,
                columns in 1usize..8,
                seed in any::<u64>(),
            ) {
                let cells = rows * columns;
                let board = (0..cells)
                    .map(|index| match seed >> (index % 64) & 1 {
                        1 => Cell::Star,
                        _ => Cell::Empty,
                    })
                    .collect::<Vec<_>>();
                let regions = (0..cells).map(|index| index / columns).collect::<Vec<_>>();
                let info = PuzzleInfo { rows, columns, board, regions };

                let text = to_text(&info);
                prop_assert_eq!(extract(&parse(&text).unwrap()).unwrap(), info);
            }
        }
    }
}
