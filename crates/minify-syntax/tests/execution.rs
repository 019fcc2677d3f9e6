//! Execution tests: rendered programs must print what a hand-written
//! reference program prints.
//!
//! Each case runs the reference and every rendering of the tree through
//! `ruby -e` and compares stdout. The interpreter is `MINIFY_RUBY` if set,
//! else `ruby` from PATH; cases are skipped when neither runs.

use minify_syntax::{ConstPath, LiteralStyle, RenderConfig, Separator, SyntaxNode, render_program};
use std::process::Command;
use std::sync::OnceLock;

const CONFIGS: [RenderConfig; 4] = [
    RenderConfig::readable(),
    RenderConfig::compact(),
    RenderConfig::new(Separator::Semicolon, LiteralStyle::Verbose),
    RenderConfig::new(Separator::Newline, LiteralStyle::Obfuscated),
];

/// Interpreter found once per test run.
static RUBY: OnceLock<Option<String>> = OnceLock::new();

fn ruby() -> Option<&'static str> {
    RUBY.get_or_init(|| {
        let ruby = std::env::var("MINIFY_RUBY").unwrap_or_else(|_| "ruby".to_string());
        Command::new(&ruby)
            .arg("--version")
            .output()
            .is_ok_and(|out| out.status.success())
            .then_some(ruby)
    })
    .as_deref()
}

fn run_ruby(ruby: &str, source: &str) -> String {
    let out = Command::new(ruby)
        .arg("-e")
        .arg(source)
        .output()
        .expect("failed to spawn ruby");
    assert!(
        out.status.success(),
        "ruby rejected:\n{source}\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn assert_same_output(program: &SyntaxNode, reference: &str) {
    let Some(ruby) = ruby() else {
        eprintln!("skipping: no ruby interpreter (set MINIFY_RUBY or add ruby to PATH)");
        return;
    };
    let expected = run_ruby(ruby, reference);
    assert!(!expected.is_empty(), "reference printed nothing");
    for config in CONFIGS {
        let code = render_program(program, config).expect("render failed");
        assert_eq!(run_ruby(ruby, &code), expected, "{config:?}:\n{code}");
    }
}

fn p(args: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::send("p", args)
}

#[test]
fn compound_arithmetic() {
    let program = SyntaxNode::block(vec![
        SyntaxNode::lasgn("count", SyntaxNode::int(0)),
        SyntaxNode::lasgn(
            "count",
            SyntaxNode::infix(SyntaxNode::lvar("count"), "+", SyntaxNode::int(1)),
        ),
        SyntaxNode::lasgn(
            "count",
            SyntaxNode::infix(SyntaxNode::lvar("count"), "*", SyntaxNode::int(3)),
        ),
        SyntaxNode::lasgn(
            "other",
            SyntaxNode::infix(SyntaxNode::lvar("count"), "-", SyntaxNode::int(1)),
        ),
        p(vec![SyntaxNode::lvar("count"), SyntaxNode::lvar("other")]),
    ]);
    assert_same_output(
        &program,
        "count = 0\ncount = count + 1\ncount = count * 3\nother = count - 1\np(count, other)",
    );
}

#[test]
fn conditionals_after_bare_calls() {
    let work = || SyntaxNode::block(vec![SyntaxNode::send("work", vec![])]);
    let program = SyntaxNode::block(vec![
        SyntaxNode::def("work", vec![], SyntaxNode::block(vec![SyntaxNode::int(5)])),
        SyntaxNode::lasgn("c", SyntaxNode::bool(true)),
        SyntaxNode::lasgn("d", SyntaxNode::bool(false)),
        SyntaxNode::lasgn(
            "r",
            SyntaxNode::if_node(
                SyntaxNode::lvar("d"),
                work(),
                Some(SyntaxNode::block(vec![SyntaxNode::call(
                    SyntaxNode::array(vec![SyntaxNode::int(1), SyntaxNode::int(2)]),
                    "size",
                    vec![],
                )])),
            ),
        ),
        SyntaxNode::lasgn("s", SyntaxNode::if_node(SyntaxNode::lvar("c"), work(), None)),
        SyntaxNode::lasgn("u", SyntaxNode::if_node(SyntaxNode::lvar("d"), work(), None)),
        SyntaxNode::lasgn(
            "v",
            SyntaxNode::unless(
                SyntaxNode::lvar("d"),
                work(),
                Some(SyntaxNode::block(vec![SyntaxNode::int(0)])),
            ),
        ),
        p(vec![
            SyntaxNode::lvar("r"),
            SyntaxNode::lvar("s"),
            SyntaxNode::lvar("u"),
            SyntaxNode::lvar("v"),
        ]),
    ]);
    assert_same_output(
        &program,
        "def work\n  5\nend\nc = true\nd = false\nr = d ? work : [1, 2].size\n\
         s = (work if c)\nu = (work if d)\nv = (d ? 0 : work)\np(r, s, u, v)",
    );
}

#[test]
fn yield_inside_lists() {
    let yield_a = || SyntaxNode::Yield {
        positional_args: vec![SyntaxNode::lvar("a")],
    };
    let program = SyntaxNode::block(vec![
        SyntaxNode::def(
            "pair",
            vec!["a".into()],
            SyntaxNode::block(vec![SyntaxNode::array(vec![yield_a(), SyntaxNode::int(2)])]),
        ),
        SyntaxNode::def(
            "fmt",
            vec!["a".into()],
            SyntaxNode::block(vec![SyntaxNode::send(
                "format",
                vec![SyntaxNode::string("%d-%d"), yield_a(), SyntaxNode::int(1)],
            )]),
        ),
        p(vec![
            SyntaxNode::send("pair", vec![SyntaxNode::int(3)]).with_block(
                vec!["x".into()],
                SyntaxNode::block(vec![SyntaxNode::infix(
                    SyntaxNode::lvar("x"),
                    "*",
                    SyntaxNode::int(10),
                )]),
            ),
            SyntaxNode::send("fmt", vec![SyntaxNode::int(4)]).with_block(
                vec!["x".into()],
                SyntaxNode::block(vec![SyntaxNode::infix(
                    SyntaxNode::lvar("x"),
                    "+",
                    SyntaxNode::int(1),
                )]),
            ),
        ]),
    ]);
    assert_same_output(
        &program,
        "def pair(a)\n  [yield(a), 2]\nend\ndef fmt(a)\n  format('%d-%d', yield(a), 1)\nend\n\
         p(pair(3) { |x| x * 10 }, fmt(4) { |x| x + 1 })",
    );
}

#[test]
fn operator_grouping() {
    let int = SyntaxNode::int;
    let program = SyntaxNode::block(vec![p(vec![
        SyntaxNode::infix(SyntaxNode::infix(int(1), "+", int(2)), "*", int(3)),
        SyntaxNode::infix(int(2), "**", SyntaxNode::infix(int(3), "**", int(2))),
        SyntaxNode::infix(int(-2), "**", int(2)),
        SyntaxNode::infix(int(10), "-", SyntaxNode::infix(int(4), "-", int(1))),
        SyntaxNode::and(
            SyntaxNode::or(SyntaxNode::bool(false), SyntaxNode::bool(true)),
            SyntaxNode::not(SyntaxNode::infix(int(1), "==", int(2))),
        ),
    ])]);
    assert_same_output(
        &program,
        "p((1 + 2) * 3, 2 ** (3 ** 2), (-2) ** 2, 10 - (4 - 1), (false || true) && !(1 == 2))",
    );
}

#[test]
fn literals_and_escapes() {
    let program = SyntaxNode::block(vec![
        SyntaxNode::lasgn("name", SyntaxNode::string("bob")),
        SyntaxNode::lasgn("field", SyntaxNode::string("size")),
        p(vec![
            SyntaxNode::InterpolatedString {
                parts: vec![
                    SyntaxNode::string("hi \""),
                    SyntaxNode::block(vec![SyntaxNode::lvar("name")]),
                    SyntaxNode::string("\" #{x} \\ \n"),
                ],
            },
            SyntaxNode::string("caf\u{e9}\t"),
            SyntaxNode::sym("two words"),
            SyntaxNode::sym("ok?"),
            SyntaxNode::InterpolatedSymbol {
                parts: vec![
                    SyntaxNode::string("get_"),
                    SyntaxNode::block(vec![SyntaxNode::lvar("field")]),
                ],
            },
            SyntaxNode::hash(vec![
                (SyntaxNode::sym("a"), SyntaxNode::int(1)),
                (
                    SyntaxNode::string("b"),
                    SyntaxNode::array(vec![SyntaxNode::int(1), SyntaxNode::int(2)]),
                ),
            ]),
        ]),
    ]);
    assert_same_output(
        &program,
        r##"name = "bob"
field = "size"
p("hi \"#{name}\" \#{x} \\ \n", "caf\u00e9\t", :"two words", :ok?, :"get_#{field}", { a: 1, "b" => [1, 2] })"##,
    );
}

#[test]
fn logical_assignment_unless_and_case() {
    let program = SyntaxNode::block(vec![
        SyntaxNode::lasgn("x", SyntaxNode::Nil),
        SyntaxNode::lasgn("x", SyntaxNode::or(SyntaxNode::lvar("x"), SyntaxNode::int(5))),
        SyntaxNode::lasgn("x", SyntaxNode::and(SyntaxNode::lvar("x"), SyntaxNode::int(6))),
        SyntaxNode::lasgn("n", SyntaxNode::int(-3)),
        SyntaxNode::lasgn(
            "sign",
            SyntaxNode::unless(
                SyntaxNode::infix(SyntaxNode::lvar("n"), ">", SyntaxNode::int(0)),
                SyntaxNode::block(vec![SyntaxNode::sym("neg")]),
                Some(SyntaxNode::block(vec![SyntaxNode::sym("pos")])),
            ),
        ),
        SyntaxNode::lasgn(
            "word",
            SyntaxNode::Case {
                pivot: Box::new(SyntaxNode::lvar("n")),
                whens: vec![SyntaxNode::int(-3), SyntaxNode::int(0)],
                clauses: vec![
                    SyntaxNode::block(vec![SyntaxNode::string("minus three")]),
                    SyntaxNode::block(vec![SyntaxNode::string("zero")]),
                ],
                else_clause: Some(Box::new(SyntaxNode::block(vec![SyntaxNode::string(
                    "other",
                )]))),
            },
        ),
        p(vec![
            SyntaxNode::lvar("x"),
            SyntaxNode::lvar("sign"),
            SyntaxNode::lvar("word"),
        ]),
    ]);
    assert_same_output(
        &program,
        r#"x = nil
x ||= 5
x &&= 6
n = -3
sign = n > 0 ? :pos : :neg
word = case n when -3 then "minus three" when 0 then "zero" else "other" end
p(x, sign, word)"#,
    );
}

#[test]
fn classes_modules_and_instance_state() {
    let program = SyntaxNode::block(vec![
        SyntaxNode::ModuleDef {
            name_path: ConstPath::simple("Greet"),
            body: Box::new(SyntaxNode::block(vec![SyntaxNode::def(
                "hi",
                vec![],
                SyntaxNode::block(vec![SyntaxNode::InterpolatedString {
                    parts: vec![
                        SyntaxNode::string("hi "),
                        SyntaxNode::block(vec![SyntaxNode::ivar("@name")]),
                    ],
                }]),
            )])),
        },
        SyntaxNode::ClassDef {
            name_path: ConstPath::simple("Person"),
            superclass_path: None,
            body: Box::new(SyntaxNode::block(vec![
                SyntaxNode::IncludeDirective {
                    args: vec![SyntaxNode::constant("Greet")],
                },
                SyntaxNode::def(
                    "initialize",
                    vec!["name".into()],
                    SyntaxNode::block(vec![SyntaxNode::iasgn("@name", SyntaxNode::lvar("name"))]),
                ),
                SyntaxNode::def(
                    "grow",
                    vec![],
                    SyntaxNode::block(vec![
                        SyntaxNode::iasgn(
                            "@age",
                            SyntaxNode::or(SyntaxNode::ivar("@age"), SyntaxNode::int(0)),
                        ),
                        SyntaxNode::iasgn(
                            "@age",
                            SyntaxNode::infix(SyntaxNode::ivar("@age"), "+", SyntaxNode::int(1)),
                        ),
                    ]),
                ),
            ])),
        },
        SyntaxNode::lasgn(
            "bob",
            SyntaxNode::call(
                SyntaxNode::constant("Person"),
                "new",
                vec![SyntaxNode::string("bob")],
            ),
        ),
        SyntaxNode::call(SyntaxNode::lvar("bob"), "grow", vec![]),
        SyntaxNode::call(SyntaxNode::lvar("bob"), "grow", vec![]),
        p(vec![
            SyntaxNode::call(SyntaxNode::lvar("bob"), "hi", vec![]),
            SyntaxNode::call(SyntaxNode::lvar("bob"), "grow", vec![]),
        ]),
    ]);
    assert_same_output(
        &program,
        r#"module Greet
  def hi
    "hi #{@name}"
  end
end
class Person
  include Greet
  def initialize(name)
    @name = name
  end
  def grow
    @age ||= 0
    @age += 1
  end
end
bob = Person.new("bob")
bob.grow
bob.grow
p(bob.hi, bob.grow)"#,
    );
}

#[test]
fn blocks_and_indexing() {
    let arr = || SyntaxNode::lvar("arr");
    let program = SyntaxNode::block(vec![
        SyntaxNode::lasgn(
            "arr",
            SyntaxNode::array(vec![SyntaxNode::int(1), SyntaxNode::int(2), SyntaxNode::int(3)]),
        ),
        SyntaxNode::call(arr(), "[]=", vec![SyntaxNode::int(0), SyntaxNode::int(5)]),
        SyntaxNode::lasgn(
            "strs",
            SyntaxNode::call(arr(), "map", vec![]).with_block_forward(SyntaxNode::sym("to_s")),
        ),
        SyntaxNode::lasgn("total", SyntaxNode::int(0)),
        SyntaxNode::call(arr(), "each", vec![]).with_block(
            vec!["v".into()],
            SyntaxNode::block(vec![SyntaxNode::lasgn(
                "total",
                SyntaxNode::infix(SyntaxNode::lvar("total"), "+", SyntaxNode::lvar("v")),
            )]),
        ),
        SyntaxNode::call(arr(), "each", vec![]).with_block(vec![], SyntaxNode::block(vec![])),
        p(vec![
            SyntaxNode::call(arr(), "[]", vec![SyntaxNode::int(0)]),
            SyntaxNode::lvar("strs"),
            SyntaxNode::lvar("total"),
        ]),
    ]);
    assert_same_output(
        &program,
        "arr = [1, 2, 3]\narr[0] = 5\nstrs = arr.map(&:to_s)\ntotal = 0\n\
         arr.each { |v| total += v }\np(arr[0], strs, total)",
    );
}
