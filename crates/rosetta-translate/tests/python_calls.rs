//! Calls, member access and object literals translated to Python.

mod common;

use common::expect_python;

#[test]
fn function_call() {
    expect_python(
        r#"
        callSomeFunction(1, 2, 3);
        "#,
        r#"
        call_some_function(1, 2, 3)
        "#,
    );
}

#[test]
fn method_call() {
    expect_python(
        r#"
        someObject.callSomeFunction(1, 2, 3);
        "#,
        r#"
        some_object.call_some_function(1, 2, 3)
        "#,
    );
}

#[test]
fn static_function_call() {
    expect_python(
        r#"
        SomeObject.callSomeFunction(1, 2, 3);
        "#,
        r#"
        SomeObject.call_some_function(1, 2, 3)
        "#,
    );
}

#[test]
fn this_as_argument() {
    expect_python(
        r#"
        callSomeFunction(this, 25);
        "#,
        r#"
        call_some_function(self, 25)
        "#,
    );
}

#[test]
fn this_as_receiver() {
    expect_python(
        r#"
        this.callSomeFunction(25);
        "#,
        r#"
        self.call_some_function(25)
        "#,
    );
}

#[test]
fn builtin_function() {
    expect_python(
        r#"
        console.log('hello', 42);
        "#,
        r#"
        print("hello", 42)
        "#,
    );
}

#[test]
fn trailing_object_becomes_keyword_arguments() {
    expect_python(
        r#"
        foo(25, { foo: 3, banana: "hello"  });
        "#,
        r#"
        foo(25, foo=3, banana="hello")
        "#,
    );
}

#[test]
fn keyword_argument_names_are_mangled() {
    expect_python(
        r#"
        foo({ bucketName: name, removalPolicy });
        "#,
        r#"
        foo(bucket_name=name, removal_policy=removal_policy)
        "#,
    );
}

#[test]
fn only_outermost_object_is_exploded() {
    expect_python(
        r#"
        foo(25, { foo: 3, deeper: { a: 1, b: 2 } });
        "#,
        r#"
        foo(25, foo=3, deeper={
            "a": 1,
            "b": 2
        })
        "#,
    );
}

#[test]
fn object_before_last_argument_stays_a_dict() {
    expect_python(
        r#"
        foo({ a: 1 }, 2);
        "#,
        r#"
        foo({
            "a": 1
        }, 2)
        "#,
    );
}

#[test]
fn empty_object_stays_a_dict() {
    expect_python(
        r#"
        foo(1, {});
        "#,
        r#"
        foo(1, {})
        "#,
    );
}

#[test]
fn new_expression() {
    expect_python(
        r#"
        const bucket = new Bucket(this, 'MyBucket', { versioned: true });
        "#,
        r#"
        bucket = Bucket(self, "MyBucket", versioned=True)
        "#,
    );
}

#[test]
fn uninitialized_variable() {
    expect_python(
        r#"
        let someValue;
        "#,
        r#"
        some_value = None
        "#,
    );
}

#[test]
fn logical_operators() {
    expect_python(
        r#"
        check(a === b && c !== null);
        "#,
        r#"
        check(a == b and c != None)
        "#,
    );
}

#[test]
fn namespace_import() {
    expect_python(
        r#"
        import * as s3 from '@aws-cdk/aws-s3';
        "#,
        r#"
        import aws_cdk.aws_s3 as s3
        "#,
    );
}

#[test]
fn named_imports() {
    expect_python(
        r#"
        import { Bucket, Stack as S } from '@aws-cdk/core';
        "#,
        r#"
        from aws_cdk.core import Bucket, Stack as S
        "#,
    );
}
