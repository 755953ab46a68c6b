//! Groups the values of one input line into table blocks.
//!
//! Consecutive values of the same shape share a block: scalars together,
//! positional tables together (widest arity wins), keyed tables while their
//! column sets match. A shape change starts a new block.

use crate::value::{Key, Value};

/// Rows rendered as one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub columns: Vec<String>,
    /// One entry per row, each padded to `columns.len()`.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Scalar,
    Positional,
    Keyed,
}

struct Row {
    shape: Shape,
    columns: Vec<String>,
    cells: Vec<String>,
}

fn positional_name(index: u64) -> String {
    format!("col{index}")
}

/// Builds the blocks for the values of one input line.
pub fn build(values: &[Value]) -> Vec<Block> {
    if values.is_empty() {
        return vec![Block {
            columns: vec![positional_name(1)],
            rows: vec![vec![String::new()]],
        }];
    }

    let mut blocks: Vec<(Shape, Block)> = Vec::new();
    for item in expand(values) {
        let row = classify(item);
        match blocks.last_mut() {
            Some((shape, block)) if *shape == row.shape && accepts(block, &row) => {
                push_row(block, row);
            }
            _ => {
                let shape = row.shape;
                blocks.push((
                    shape,
                    Block {
                        columns: row.columns,
                        rows: vec![row.cells],
                    },
                ));
            }
        }
    }

    blocks
        .into_iter()
        .map(|(_, mut block)| {
            let width = block.columns.len();
            for row in &mut block.rows {
                row.resize(width, String::new());
            }
            block
        })
        .collect()
}

/// A single top-level array of tables is a row set of its own.
fn expand(values: &[Value]) -> Vec<&Value> {
    if let [Value::Array(items)] = values
        && !items.is_empty()
        && items.iter().all(Value::is_container)
    {
        return items.iter().collect();
    }
    values.iter().collect()
}

fn classify(value: &Value) -> Row {
    match value {
        Value::Array(items) => positional_row(items.iter()),
        Value::Map(entries) if Value::is_positional_map(entries) => {
            positional_row(entries.iter().map(|(_, v)| v))
        }
        Value::Map(entries) => keyed_row(entries),
        Value::Error(message) => Row {
            shape: Shape::Keyed,
            columns: vec!["error".to_string()],
            cells: vec![message.clone()],
        },
        scalar => Row {
            shape: Shape::Scalar,
            columns: vec![positional_name(1)],
            cells: vec![scalar.cell_text()],
        },
    }
}

fn positional_row<'a>(items: impl Iterator<Item = &'a Value>) -> Row {
    let cells: Vec<String> = items.map(Value::cell_text).collect();
    Row {
        shape: Shape::Positional,
        columns: (1..=cells.len() as u64).map(positional_name).collect(),
        cells,
    }
}

fn keyed_row(entries: &[(Key, Value)]) -> Row {
    let mut indexed: Vec<(u64, &Value)> = entries
        .iter()
        .filter_map(|(key, value)| match key {
            Key::Index(index) => Some((*index, value)),
            Key::Name(_) => None,
        })
        .collect();
    indexed.sort_by_key(|(index, _)| *index);

    let mut columns = Vec::with_capacity(entries.len());
    let mut cells = Vec::with_capacity(entries.len());
    for (index, value) in indexed {
        columns.push(positional_name(index));
        cells.push(value.cell_text());
    }
    for (key, value) in entries {
        if let Key::Name(name) = key {
            columns.push(name.clone());
            cells.push(value.cell_text());
        }
    }

    Row {
        shape: Shape::Keyed,
        columns,
        cells,
    }
}

fn accepts(block: &Block, row: &Row) -> bool {
    match row.shape {
        Shape::Scalar | Shape::Positional => true,
        Shape::Keyed => {
            block.columns.len() == row.columns.len()
                && row.columns.iter().all(|c| block.columns.contains(c))
        }
    }
}

fn push_row(block: &mut Block, row: Row) {
    match row.shape {
        Shape::Scalar | Shape::Positional => {
            if row.columns.len() > block.columns.len() {
                block.columns = row.columns;
            }
            block.rows.push(row.cells);
        }
        Shape::Keyed => {
            let mut cells = vec![String::new(); block.columns.len()];
            for (column, cell) in row.columns.iter().zip(row.cells) {
                if let Some(slot) = block.columns.iter().position(|c| c == column) {
                    cells[slot] = cell;
                }
            }
            block.rows.push(cells);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::Array(values.iter().copied().map(Value::Integer).collect())
    }

    fn hi(data: i64, text: &str) -> Value {
        Value::map([
            (Key::from("data"), Value::Integer(data)),
            (Key::Index(1), Value::string(text)),
        ])
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_line_is_one_empty_cell() {
        let blocks = build(&[]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].columns, strings(&["col1"]));
        assert_eq!(blocks[0].rows, vec![strings(&[""])]);
    }

    #[test]
    fn test_positional_rows_share_widest_block() {
        let values = [
            ints(&[10, 20, 30]),
            ints(&[40, 50, 60]),
            ints(&[70, 80]),
            Value::Array(vec![Value::Null, Value::Integer(90)]),
        ];
        let blocks = build(&values);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].columns, strings(&["col1", "col2", "col3"]));
        assert_eq!(blocks[0].rows[2], strings(&["70", "80", ""]));
        assert_eq!(blocks[0].rows[3], strings(&["nil", "90", ""]));
    }

    #[test]
    fn test_shorter_first_row_widens_block() {
        let blocks = build(&[ints(&[1]), ints(&[2, 3])]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].columns, strings(&["col1", "col2"]));
        assert_eq!(blocks[0].rows[0], strings(&["1", ""]));
    }

    #[test]
    fn test_single_array_of_tables_expands() {
        let blocks = build(&[Value::Array(vec![ints(&[10, 20]), ints(&[30, 40])])]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rows, vec![strings(&["10", "20"]), strings(&["30", "40"])]);
    }

    #[test]
    fn test_mixed_array_is_one_row_with_json_cells() {
        let value = Value::Array(vec![ints(&[10, 20]), ints(&[30, 40]), Value::Bool(true)]);
        let blocks = build(&[value]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rows, vec![strings(&["[10,20]", "[30,40]", "true"])]);
    }

    #[test]
    fn test_deeply_nested_value() {
        let value = Value::Array(vec![Value::Array(vec![Value::Array(vec![
            Value::Integer(4),
        ])])]);
        let blocks = build(&[value]);
        assert_eq!(blocks[0].rows, vec![strings(&["[4]"])]);
    }

    #[test]
    fn test_shape_changes_split_blocks() {
        let values = [
            hi(123, "Hi"),
            hi(321, "My"),
            Value::map([("qwe", Value::Integer(11))]),
            Value::Bool(true),
            Value::Null,
            Value::Integer(2023),
            Value::Bool(false),
            ints(&[10, 20]),
            ints(&[30, 40]),
            ints(&[50]),
        ];
        let blocks = build(&values);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].columns, strings(&["col1", "data"]));
        assert_eq!(blocks[0].rows[1], strings(&["My", "321"]));
        assert_eq!(blocks[1].columns, strings(&["qwe"]));
        assert_eq!(
            blocks[2].rows,
            vec![
                strings(&["true"]),
                strings(&["nil"]),
                strings(&["2023"]),
                strings(&["false"]),
            ]
        );
        assert_eq!(blocks[3].rows[2], strings(&["50", ""]));
    }

    #[test]
    fn test_keyed_rows_match_by_name() {
        let first = Value::map([("a", Value::Integer(1)), ("b", Value::Integer(2))]);
        let second = Value::map([("b", Value::Integer(3)), ("a", Value::Integer(4))]);
        let blocks = build(&[first, second]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].columns, strings(&["a", "b"]));
        assert_eq!(blocks[0].rows[1], strings(&["4", "3"]));
    }

    #[test]
    fn test_partially_overlapping_keys_split() {
        let first = Value::map([("a", Value::Integer(1)), ("b", Value::Integer(2))]);
        let second = Value::map([("a", Value::Integer(3))]);
        let third = Value::map([("a", Value::Integer(4)), ("c", Value::Integer(5))]);
        assert_eq!(build(&[first, second, third]).len(), 3);
    }

    #[test]
    fn test_scalar_after_positional_starts_new_block() {
        let blocks = build(&[ints(&[10, 20]), ints(&[30, 40]), Value::Bool(true)]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].columns, strings(&["col1"]));
    }

    #[test]
    fn test_error_is_its_own_column() {
        let blocks = build(&[Value::error("test")]);
        assert_eq!(blocks[0].columns, strings(&["error"]));
        assert_eq!(blocks[0].rows, vec![strings(&["test"])]);
    }
}
