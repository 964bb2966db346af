//! Terminal rendering of diff op sequences.

use inkvault_diff::DiffOp;

/// Render an op sequence as a +/- prefixed listing.
pub fn render_ops(ops: &[DiffOp]) -> String {
    let mut output = String::new();

    for op in ops {
        let sign = match op {
            DiffOp::Delete(_) => '-',
            DiffOp::Insert(_) => '+',
            DiffOp::Equal(_) => ' ',
        };
        output.push(sign);
        output.push_str(op.line());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_signs_per_op() {
        let ops = vec![
            DiffOp::Equal("line1".into()),
            DiffOp::Insert("lineTWO".into()),
            DiffOp::Delete("line2".into()),
        ];
        assert_eq!(render_ops(&ops), " line1\n+lineTWO\n-line2\n");
    }

    #[test]
    fn empty_ops_render_nothing() {
        assert_eq!(render_ops(&[]), "");
    }
}
