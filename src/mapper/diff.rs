use super::types::{OpSpan, SpanKind};

/// One primitive edit in the shortest edit script, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Keep,
    Del,
    Ins,
}

/// Compute the minimal edit script between two line sequences and coalesce
/// it into opcode spans.
///
/// Lines are opaque tokens compared by exact string equality; no line is
/// treated as junk. The returned spans cover the generated index space
/// exactly once each (`Delete` spans contribute no generated lines) and
/// appear in increasing order on both sides.
pub fn line_opcodes(original: &[&str], generated: &[&str]) -> Vec<OpSpan> {
    coalesce(&myers_edits(original, generated))
}

/// Myers shortest-edit-script search, keeping the per-round frontier so the
/// script can be recovered by backtracking.
fn myers_edits(a: &[&str], b: &[&str]) -> Vec<Step> {
    let n = a.len();
    let m = b.len();
    if n == 0 && m == 0 {
        return Vec::new();
    }

    let max = (n + m) as isize;
    let offset = max;
    let mut v = vec![0usize; (2 * max + 1) as usize];
    let mut trace: Vec<Vec<usize>> = Vec::new();

    for d in 0..=max {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let ki = (k + offset) as usize;
            let mut x = if k == -d || (k != d && v[ki - 1] < v[ki + 1]) {
                v[ki + 1]
            } else {
                v[ki - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && a[x] == b[y] {
                x += 1;
                y += 1;
            }
            v[ki] = x;
            if x >= n && y >= m {
                return backtrack(&trace, d, offset, n, m);
            }
            k += 2;
        }
    }

    // d = n + m always reaches (n, m)
    Vec::new()
}

fn backtrack(trace: &[Vec<usize>], d_final: isize, offset: isize, n: usize, m: usize) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut x = n as isize;
    let mut y = m as isize;

    for d in (0..=d_final).rev() {
        let v = &trace[d as usize];
        let k = x - y;
        let prev_k = if k == -d
            || (k != d && v[(k - 1 + offset) as usize] < v[(k + 1 + offset) as usize])
        {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[(prev_k + offset) as usize] as isize;
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            steps.push(Step::Keep);
            x -= 1;
            y -= 1;
        }

        if d > 0 {
            if x == prev_x {
                steps.push(Step::Ins);
            } else {
                steps.push(Step::Del);
            }
            x = prev_x;
            y = prev_y;
        }
    }

    steps.reverse();
    steps
}

/// Group runs of primitive edits into opcode spans. A run mixing deletions
/// and insertions becomes a single `Replace` span.
fn coalesce(steps: &[Step]) -> Vec<OpSpan> {
    let mut spans = Vec::new();
    let mut ai = 0usize;
    let mut bi = 0usize;
    let mut i = 0usize;

    while i < steps.len() {
        let a_start = ai;
        let b_start = bi;

        if steps[i] == Step::Keep {
            while i < steps.len() && steps[i] == Step::Keep {
                ai += 1;
                bi += 1;
                i += 1;
            }
            spans.push(OpSpan {
                kind: SpanKind::Equal,
                original: a_start..ai,
                generated: b_start..bi,
            });
        } else {
            while i < steps.len() && steps[i] != Step::Keep {
                if steps[i] == Step::Del {
                    ai += 1;
                } else {
                    bi += 1;
                }
                i += 1;
            }
            let kind = if ai > a_start && bi > b_start {
                SpanKind::Replace
            } else if bi > b_start {
                SpanKind::Insert
            } else {
                SpanKind::Delete
            };
            spans.push(OpSpan {
                kind,
                original: a_start..ai,
                generated: b_start..bi,
            });
        }
    }

    spans
}
