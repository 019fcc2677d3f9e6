//! Generated syntax trees shared by the benchmarks.

use minify_syntax::{ConstPath, SyntaxNode};

/// A method summing `@items` and classifying the total.
pub fn method(index: usize) -> SyntaxNode {
    let total = SyntaxNode::lasgn(
        "total",
        SyntaxNode::infix(SyntaxNode::lvar("total"), "+", SyntaxNode::lvar("n")),
    );
    let each = SyntaxNode::call(SyntaxNode::ivar("@items"), "each", vec![])
        .with_block(vec!["n".into()], SyntaxNode::block(vec![total]));
    let guard = SyntaxNode::if_node(
        SyntaxNode::infix(SyntaxNode::lvar("total"), ">", SyntaxNode::int(100)),
        SyntaxNode::block(vec![SyntaxNode::sym("big")]),
        Some(SyntaxNode::block(vec![SyntaxNode::sym("small")])),
    );
    SyntaxNode::def(
        format!("sum_{index}"),
        vec![],
        SyntaxNode::block(vec![SyntaxNode::lasgn("total", SyntaxNode::int(0)), each, guard]),
    )
}

/// `classes` top-level classes with `methods` methods each.
pub fn program(classes: usize, methods: usize) -> SyntaxNode {
    SyntaxNode::block(
        (0..classes)
            .map(|c| SyntaxNode::ClassDef {
                name_path: ConstPath::simple(format!("Bag{c}")),
                superclass_path: None,
                body: Box::new(SyntaxNode::block((0..methods).map(method).collect())),
            })
            .collect(),
    )
}
