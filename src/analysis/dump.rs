//! Formatted symbol-table listing
//!
//! A diagnostic view of everything the builder pass collected: each scope
//! in creation order with its entries' kinds, data types, and use lines.

use crate::analysis::scope::{SymbolKind, SymbolRecord, SymbolTable};
use crate::syntax::{ExpType, SyntaxTree};

fn kind_label(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::Variable => "Variable",
        SymbolKind::Array => "Array Var.",
        SymbolKind::Function => "Function",
        SymbolKind::Unresolved => "Unknown",
    }
}

fn data_type_label(ty: ExpType) -> &'static str {
    match ty {
        ExpType::Void | ExpType::VoidArray => "Void",
        ExpType::Integer | ExpType::IntegerArray => "Integer",
        ExpType::Error => "TypeError",
    }
}

fn push_record(out: &mut String, tree: &SyntaxTree, record: &SymbolRecord) {
    out.push_str(&format!(
        "{:<14}{:<14}{:<14}",
        record.name,
        kind_label(record.kind),
        data_type_label(tree.node(record.decl).ty)
    ));
    for line in &record.lines {
        out.push_str(&format!("{line:>3} "));
    }
    out.push('\n');
}

/// Render the whole symbol table as text, scopes in creation order
pub fn dump_symbol_table(table: &SymbolTable, tree: &SyntaxTree) -> String {
    let mut out = String::new();

    for (index, scope) in table.scopes().enumerate() {
        if index == 0 {
            out.push_str(&format!("GLOBAL scope (nested level: {})\n", scope.depth()));
        } else {
            out.push_str(&format!(
                "Function name: {} (nested level: {})\n",
                scope.name(),
                scope.depth()
            ));
        }
        out.push_str("Symbol Name   Symbol Type   Data Type     Line Numbers\n");
        out.push_str("------------  ------------  ------------  ------------\n");

        for record in scope.records() {
            push_record(&mut out, tree, record);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::syntax::SyntaxTree;

    #[test]
    fn test_dump_lists_scopes_and_records() {
        // int x[5]; int main(void) { x[0] = 0; return 0; }
        let mut tree = SyntaxTree::new();
        let x = tree.array_decl("x", ExpType::IntegerArray, 5, 1);
        let index = tree.constant(0, 3);
        let target = tree.array_id("x", index, 3);
        let zero = tree.constant(0, 3);
        let assign = tree.assign(target, zero, 3);
        let ret_zero = tree.constant(0, 4);
        let ret = tree.return_stmt(Some(ret_zero), 4);
        tree.link(assign, ret);
        let param = tree.param(None, ExpType::Void, 2);
        let body = tree.compound(None, Some(assign), 2);
        let main = tree.fun_decl("main", ExpType::Integer, Some(param), body, 2);
        tree.link(x, main);
        tree.set_root(x);

        let session = analyze(&mut tree);
        assert!(!session.has_errors(), "{:?}", session.diagnostics);

        let dump = dump_symbol_table(&session.table, &tree);
        assert!(dump.contains("GLOBAL scope (nested level: 0)"));
        assert!(dump.contains("Function name: main (nested level: 1)"));
        assert!(dump.contains("Symbol Name   Symbol Type   Data Type     Line Numbers"));

        // the array row carries its kind, data type, and both use lines
        let row = dump
            .lines()
            .find(|l| l.starts_with("x "))
            .expect("row for x");
        assert!(row.contains("Array Var."));
        assert!(row.contains("Integer"));
        assert!(row.contains("  1 "));
        assert!(row.contains("  3 "));

        // builtins show up under the global scope with their synthetic line
        let input_row = dump
            .lines()
            .find(|l| l.starts_with("input "))
            .expect("row for input");
        assert!(input_row.contains("Function"));
        assert!(input_row.contains("  0 "));
    }

    #[test]
    fn test_dump_of_empty_table_is_empty() {
        let table = SymbolTable::new();
        let tree = SyntaxTree::new();
        assert_eq!(dump_symbol_table(&table, &tree), "");
    }
}
