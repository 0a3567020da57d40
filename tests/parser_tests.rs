/// End-to-end tests: source text → Scanner → Parser → Syntax Tree
use slua::{Error, Parser, Scanner, SyntaxTree, TokenCategory};

fn parse_ok(source: &str) -> SyntaxTree {
    slua::parse(source).unwrap()
}

fn chunk_statements(tree: SyntaxTree) -> Vec<SyntaxTree> {
    match tree {
        SyntaxTree::Chunk(chunk) => chunk.block.statements,
        other => panic!("expected chunk, got {:?}", other),
    }
}

#[test]
fn test_demo_program() {
    let scanner = Scanner::from_source("local さよなら = 'Hello, 世界'");
    let tree = Parser::new(scanner).parse().unwrap();

    assert_eq!(
        tree.to_string(),
        "(chunk (block (local (さよなら) (\"Hello, 世界\"))))"
    );
}

#[test]
fn test_local_round_trip() {
    let statements = chunk_statements(parse_ok("local x = 1"));
    assert_eq!(statements.len(), 1);

    let SyntaxTree::LocalNameListStatement(local) = &statements[0] else {
        panic!("expected local statement, got {:?}", statements[0]);
    };
    assert_eq!(local.names.names.len(), 1);
    assert_eq!(local.names.names[0].text(), Some("x"));

    let values = &local.expressions.as_ref().unwrap().expressions;
    assert_eq!(values.len(), 1);
    let SyntaxTree::Terminator(one) = &values[0] else {
        panic!("expected terminator, got {:?}", values[0]);
    };
    assert_eq!(one.token.category, TokenCategory::Number);
    assert_eq!(one.token.number_value(), Some(1.0));
}

#[test]
fn test_multiplication_binds_tighter() {
    let statements = chunk_statements(parse_ok("local x = 1 + 2 * 3"));
    let SyntaxTree::LocalNameListStatement(local) = &statements[0] else {
        panic!("expected local statement");
    };
    let SyntaxTree::BinaryExpression(sum) = &local.expressions.as_ref().unwrap().expressions[0]
    else {
        panic!("expected binary expression");
    };

    assert_eq!(sum.operator.category, TokenCategory::Add);
    assert!(matches!(*sum.left, SyntaxTree::Terminator(_)));
    let SyntaxTree::BinaryExpression(product) = sum.right.as_ref() else {
        panic!("expected nested product");
    };
    assert_eq!(product.operator.category, TokenCategory::Mul);
    assert_eq!(product.to_string(), "(* 2 3)");
}

#[test]
fn test_unary_minus_binds_tighter_than_addition() {
    let statements = chunk_statements(parse_ok("local x = -1 + 2"));
    let SyntaxTree::LocalNameListStatement(local) = &statements[0] else {
        panic!("expected local statement");
    };
    let SyntaxTree::BinaryExpression(sum) = &local.expressions.as_ref().unwrap().expressions[0]
    else {
        panic!("expected binary expression");
    };

    assert_eq!(sum.operator.category, TokenCategory::Add);
    let SyntaxTree::UnaryExpression(negated) = sum.left.as_ref() else {
        panic!("expected unary left operand");
    };
    assert_eq!(negated.operator.category, TokenCategory::Sub);
    assert_eq!(sum.right.to_string(), "2");
}

#[test]
fn test_if_chain_shape() {
    let statements = chunk_statements(parse_ok(
        "if a then b=1 elseif c then b=2 else b=3 end",
    ));
    assert_eq!(statements.len(), 1);

    let SyntaxTree::IfStatement(if_stmt) = &statements[0] else {
        panic!("expected if statement");
    };
    let Some(SyntaxTree::ElseifStatement(elseif)) = if_stmt.false_branch.as_deref() else {
        panic!("expected elseif as false branch");
    };
    let Some(SyntaxTree::ElseStatement(else_stmt)) = elseif.false_branch.as_deref() else {
        panic!("expected else as nested false branch");
    };
    assert_eq!(else_stmt.block.len(), 1);
}

#[test]
fn test_nested_program() {
    let source = r#"
        -- count down
        local n, msg = 10, "start"
        while n > 0 do
            if n == 5 then
                msg = msg .. " half"
            elseif not (n ~= 1) then
                msg = msg .. ' last';
            end
            n = n - 1
        end
        do local done = true end
    "#;

    let statements = chunk_statements(parse_ok(source));
    assert_eq!(statements.len(), 3);
    assert!(matches!(statements[0], SyntaxTree::LocalNameListStatement(_)));
    assert!(matches!(statements[2], SyntaxTree::DoStatement(_)));

    let SyntaxTree::WhileStatement(while_stmt) = &statements[1] else {
        panic!("expected while statement");
    };
    assert_eq!(while_stmt.condition.to_string(), "(> n 0)");
    assert_eq!(while_stmt.block.len(), 2);
    assert_eq!(
        while_stmt.block.statements[0].to_string(),
        "(if (== n 5) (block (= (msg) ((.. msg \" half\")))) \
         (elseif (not (~= n 1)) (block (= (msg) ((.. msg \" last\"))))))"
    );
}

#[test]
fn test_missing_end_reports_eof() {
    let err = slua::parse("do x=1").unwrap_err();

    let Error::SyntaxError { token, message, .. } = &err else {
        panic!("expected syntax error, got {:?}", err);
    };
    assert_eq!(token.category, TokenCategory::Eof);
    assert_eq!(message, "expect 'end' for 'do' statement");
    assert!(err
        .to_string()
        .ends_with("'<eof>' expect 'end' for 'do' statement"));
    assert!(err.to_string().starts_with("parser:1:"));
}

#[test]
fn test_unterminated_string_is_lexical() {
    let err = Scanner::from_source("'abc").scan().unwrap_err();
    assert!(matches!(err, Error::LexicalError { .. }));
    assert_eq!(err.message(), "incomplete string at <eof>");

    // The parser surfaces the scanner's error unchanged
    assert_eq!(slua::parse("x = 'abc").unwrap_err().message(), err.message());
}

#[test]
fn test_syntax_error_names_offending_token() {
    let err = slua::parse("x = 1\nfoo bar = 2").unwrap_err();
    assert_eq!(err.to_string(), "parser:2:5: 'bar' expect ',' to split var");
    assert!(!err.is_internal());
}

#[test]
fn test_tree_serializes_to_json() {
    let tree = parse_ok("local s = 'q' .. 2");
    let json = serde_json::to_string(&tree).unwrap();
    assert!(json.contains("LocalNameListStatement"));
    assert!(json.contains("BinaryExpression"));

    let restored: SyntaxTree = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, tree);
}

#[test]
fn test_deep_nesting_is_a_syntax_error() {
    let depth = slua::MAX_SYNTAX_LEVELS / 2;
    let source = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse_ok(&source).to_string(), "(chunk (block (= (x) (1))))");

    for n in [500, 10_000] {
        let source = format!("x = {}1{}", "(".repeat(n), ")".repeat(n));
        let err = slua::parse(&source).unwrap_err();
        assert!(matches!(err, Error::SyntaxError { .. }));
        assert_eq!(err.message(), "too many syntax levels");
    }

    let source = format!("{}x = 1{}", "while a do ".repeat(600), " end".repeat(600));
    assert_eq!(
        slua::parse(&source).unwrap_err().message(),
        "too many syntax levels"
    );
}
