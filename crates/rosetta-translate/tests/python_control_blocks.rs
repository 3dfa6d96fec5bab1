//! Blocks, conditionals and functions translated to Python.

mod common;

use common::expect_python;

#[test]
fn if_statement() {
    expect_python(
        r#"
        if (x == 3) {
          console.log('bye');
        }
        "#,
        r#"
        if x == 3:
            print("bye")
        "#,
    );
}

#[test]
fn if_then_else() {
    expect_python(
        r#"
        if (x == 3) {
          console.log('bye');
        } else {
          console.log('toodels');
        }
        "#,
        r#"
        if x == 3:
            print("bye")
        else:
            print("toodels")
        "#,
    );
}

#[test]
fn multiline_if_then_else() {
    expect_python(
        r#"
        if (x == 3) {
          x += 1;
          console.log('bye');
        } else {
          console.log('toodels');
        }
        "#,
        r#"
        if x == 3:
            x += 1
            print("bye")
        else:
            print("toodels")
        "#,
    );
}

#[test]
fn else_if_chain() {
    expect_python(
        r#"
        if (x == 3) {
          console.log('three');
        } else if (x == 4) {
          console.log('four');
        } else {
          console.log('other');
        }
        "#,
        r#"
        if x == 3:
            print("three")
        elif x == 4:
            print("four")
        else:
            print("other")
        "#,
    );
}

#[test]
fn empty_control_block() {
    expect_python(
        r#"
        if (x == 3) {
        }
        "#,
        r#"
        if x == 3:
            pass
        "#,
    );
}

#[test]
fn block_without_braces() {
    expect_python(
        r#"
        if (x == 3) console.log('hello');
        "#,
        r#"
        if x == 3: print("hello")
        "#,
    );
}

#[test]
fn nested_blocks() {
    expect_python(
        r#"
        if (a) {
          if (b) {
            doIt();
          }
        }
        "#,
        r#"
        if a:
            if b:
                do_it()
        "#,
    );
}

#[test]
fn function_declaration() {
    expect_python(
        r#"
        function greetUser(name: string, greeting = 'hi') {
          console.log(greeting, name);
        }
        "#,
        r#"
        def greet_user(name, greeting="hi"):
            print(greeting, name)
        "#,
    );
}

#[test]
fn statements_in_sequence() {
    expect_python(
        r#"
        const a = 1;
        foo(a);
        "#,
        r#"
        a = 1
        foo(a)
        "#,
    );
}
