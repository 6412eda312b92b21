use pcline::mapper::{
    build_alignment_map, line_opcodes, query_alignment_map, AlignmentMapper, LineMapper, MapError,
    Resolution, SpanKind,
};

#[cfg(test)]
mod alignment_tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let lines = vec!["a", "b", "c", "d", "e"];
        let map = build_alignment_map(&lines, &lines, None);

        for i in 1..=5 {
            assert_eq!(
                query_alignment_map(i, &map, 5).unwrap(),
                Resolution::Original(i),
                "identical files map every line to itself"
            );
        }
    }

    #[test]
    fn test_inserted_line_scenario() {
        let original = vec!["A", "B", "C", "D", "E"];
        let generated = vec!["A", "B", "NEW", "C", "D", "E"];
        let map = build_alignment_map(&original, &generated, None);

        assert_eq!(
            query_alignment_map(3, &map, 6).unwrap(),
            Resolution::Injected,
            "the inserted line has no original counterpart"
        );
        assert_eq!(
            query_alignment_map(4, &map, 6).unwrap(),
            Resolution::Original(3)
        );
        assert_eq!(
            query_alignment_map(6, &map, 6).unwrap(),
            Resolution::Original(5)
        );
    }

    #[test]
    fn test_boilerplate_prefix_is_sentinel() {
        let original = vec!["A", "B", "C", "D", "E"];
        let generated = vec!["/* preamble */", "#include <sqlca.h>", "A", "B", "C", "D", "E"];
        let map = build_alignment_map(&original, &generated, None);

        assert_eq!(
            query_alignment_map(1, &map, 7).unwrap(),
            Resolution::Boilerplate,
            "lines before any mapped region answer with the sentinel"
        );
        assert_eq!(
            query_alignment_map(2, &map, 7).unwrap(),
            Resolution::Boilerplate
        );
        assert_eq!(
            query_alignment_map(3, &map, 7).unwrap(),
            Resolution::Original(1)
        );
    }

    #[test]
    fn test_deleted_lines_shift_mapping() {
        let original = vec!["A", "B", "C"];
        let generated = vec!["A", "C"];
        let map = build_alignment_map(&original, &generated, None);

        assert_eq!(
            query_alignment_map(2, &map, 2).unwrap(),
            Resolution::Original(3),
            "a dropped original line must not shift later matches"
        );
    }

    #[test]
    fn test_replace_span_pins_to_first_original_line() {
        // Documented heuristic: every generated line of a replaced region
        // answers with the first original line of that region.
        let original = vec!["A", "B", "C", "D"];
        let generated = vec!["A", "X", "Y", "D"];
        let map = build_alignment_map(&original, &generated, None);

        assert_eq!(
            query_alignment_map(2, &map, 4).unwrap(),
            Resolution::Original(2)
        );
        assert_eq!(
            query_alignment_map(3, &map, 4).unwrap(),
            Resolution::Original(2),
            "both replaced lines pin to the start of the original span"
        );
        assert_eq!(
            query_alignment_map(4, &map, 4).unwrap(),
            Resolution::Original(4)
        );
    }

    #[test]
    fn test_monotonic_within_equal_span() {
        let original = vec!["A", "B", "C", "D", "E"];
        let generated = vec!["NEW", "A", "B", "C", "D", "E"];
        let map = build_alignment_map(&original, &generated, None);

        let mut previous = 0;
        for g in 2..=6 {
            match query_alignment_map(g, &map, 6).unwrap() {
                Resolution::Original(n) => {
                    assert_eq!(
                        n,
                        previous + 1,
                        "mapped lines increase by exactly 1 inside an equal span"
                    );
                    previous = n;
                }
                other => panic!("expected a resolved line for {}, got {:?}", g, other),
            }
        }
    }

    #[test]
    fn test_validation_errors_both_bounds() {
        let lines = vec!["a", "b", "c"];
        let map = build_alignment_map(&lines, &lines, None);

        assert_eq!(
            query_alignment_map(0, &map, 3),
            Err(MapError::LineOutOfRange { line: 0, total: 3 })
        );
        assert_eq!(
            query_alignment_map(4, &map, 3),
            Err(MapError::LineOutOfRange { line: 4, total: 3 })
        );
    }

    #[test]
    fn test_query_is_total_in_range() {
        let original = vec!["A", "B", "C", "D", "E"];
        let generated = vec!["x", "A", "y", "C", "E", "z"];
        let map = build_alignment_map(&original, &generated, None);

        for g in 1..=6 {
            // Every in-range query answers with exactly one outcome.
            query_alignment_map(g, &map, 6).expect("in-range query never errors");
        }
    }

    #[test]
    fn test_idempotent_build() {
        let original = vec!["A", "B", "C"];
        let generated = vec!["A", "NEW", "B", "C"];

        let first = build_alignment_map(&original, &generated, None);
        let second = build_alignment_map(&original, &generated, None);
        assert_eq!(first, second, "building twice yields identical maps");
    }

    #[test]
    fn test_alignment_mapper_trait() {
        let original = vec!["A", "B", "C"];
        let generated = vec!["A", "NEW", "B", "C"];
        let mapper = AlignmentMapper::new(&original, &generated, None);

        assert_eq!(mapper.resolve(3).unwrap(), Resolution::Original(2));
        assert_eq!(mapper.resolve(2).unwrap(), Resolution::Injected);
        assert!(mapper.resolve(5).is_err());
    }

    #[test]
    fn test_trace_sink_sees_every_span() {
        let original = vec!["A", "B", "C", "D", "E"];
        let generated = vec!["A", "B", "NEW", "C", "D", "E"];

        let mut seen = Vec::new();
        let mut sink = |kind: SpanKind, orig: std::ops::Range<usize>, gen: std::ops::Range<usize>| {
            seen.push((kind, orig, gen));
        };
        build_alignment_map(&original, &generated, Some(&mut sink));

        let kinds: Vec<SpanKind> = seen.iter().map(|(k, _, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![SpanKind::Equal, SpanKind::Insert, SpanKind::Equal],
            "one callback per span, in order"
        );
        assert_eq!(seen[1].2, 2..3, "the inserted generated line is line index 2");
    }
}

#[cfg(test)]
mod opcode_tests {
    use super::*;

    #[test]
    fn test_spans_partition_generated_space() {
        let original = vec!["A", "B", "C", "D"];
        let generated = vec!["x", "A", "y", "C", "D", "z"];
        let spans = line_opcodes(&original, &generated);

        let mut next = 0;
        for span in &spans {
            if span.kind == SpanKind::Delete {
                assert!(span.generated.is_empty(), "delete spans contribute no generated lines");
                continue;
            }
            assert_eq!(span.generated.start, next, "spans must tile without gaps");
            next = span.generated.end;
        }
        assert_eq!(next, generated.len(), "spans must cover the whole generated file");
    }

    #[test]
    fn test_all_equal_on_identical_input() {
        let lines = vec!["a", "b", "c"];
        let spans = line_opcodes(&lines, &lines);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::Equal);
        assert_eq!(spans[0].original, 0..3);
        assert_eq!(spans[0].generated, 0..3);
    }

    #[test]
    fn test_no_junk_heuristic_for_blank_lines() {
        // Blank lines are ordinary tokens and must still align.
        let original = vec!["A", "", "B"];
        let generated = vec!["A", "", "B"];
        let spans = line_opcodes(&original, &generated);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::Equal);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(line_opcodes(&[], &[]).is_empty());

        let spans = line_opcodes(&[], &["a", "b"]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::Insert);

        let spans = line_opcodes(&["a", "b"], &[]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::Delete);
    }
}
