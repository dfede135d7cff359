use super::{count_placeholders, literal, number_placeholders, params, placeholder};
use crate::expr::{IntoExpr, case_when, count_all};
use crate::path::{EntityPath, NumberPath, StringPath};
use crate::predicate::Predicate;
use crate::value::Value;

struct User;

struct Users {
    first_name: StringPath,
    city: StringPath,
    age: NumberPath<i32>,
}

fn users() -> Users {
    let table = EntityPath::<User>::new("user");
    Users {
        first_name: table.string("firstName"),
        city: table.string("city"),
        age: table.number("age"),
    }
}

fn extracted(p: &Predicate) -> Vec<Value> {
    let mut out = Vec::new();
    params::collect_predicate(p, &mut out).unwrap();
    out
}

#[test]
fn eq_literal() {
    let u = users();
    let sql = literal::predicate_sql(&u.first_name.eq("John")).unwrap();
    assert_eq!(sql, "(user.firstName = 'John')");
}

#[test]
fn eq_parameterized() {
    let u = users();
    let p = u.first_name.eq("John");
    assert_eq!(placeholder::predicate_sql(&p).unwrap(), "(user.firstName = ?)");
    assert_eq!(extracted(&p), vec![Value::Text("John".into())]);
}

#[test]
fn comparison_symbols() {
    let u = users();
    assert_eq!(literal::predicate_sql(&u.age.ne(5)).unwrap(), "(user.age != 5)");
    assert_eq!(literal::predicate_sql(&u.age.lt(5)).unwrap(), "(user.age < 5)");
    assert_eq!(literal::predicate_sql(&u.age.loe(5)).unwrap(), "(user.age <= 5)");
    assert_eq!(literal::predicate_sql(&u.age.gt(5)).unwrap(), "(user.age > 5)");
    assert_eq!(literal::predicate_sql(&u.age.goe(5)).unwrap(), "(user.age >= 5)");
}

#[test]
fn between_literal_and_parameterized() {
    let u = users();
    let p = u.age.between(25, 65);
    assert_eq!(
        literal::predicate_sql(&p).unwrap(),
        "(user.age BETWEEN 25 AND 65)"
    );
    assert_eq!(
        placeholder::predicate_sql(&p).unwrap(),
        "(user.age BETWEEN ? AND ?)"
    );
    assert_eq!(extracted(&p), vec![Value::Int(25), Value::Int(65)]);
}

#[test]
fn in_list_preserves_element_count() {
    let u = users();
    let p = u.city.in_list(["A", "B"]);
    assert_eq!(
        literal::predicate_sql(&p).unwrap(),
        "(user.city IN ('A', 'B'))"
    );
    assert_eq!(placeholder::predicate_sql(&p).unwrap(), "(user.city IN (?, ?))");
    assert_eq!(
        extracted(&p),
        vec![Value::Text("A".into()), Value::Text("B".into())]
    );
}

#[test]
fn empty_in_list_is_rejected_by_all_traversals() {
    let u = users();
    let p = u.city.in_list(Vec::<String>::new());
    assert!(literal::predicate_sql(&p).is_err());
    assert!(placeholder::predicate_sql(&p).is_err());
    let mut out = Vec::new();
    assert!(params::collect_predicate(&p, &mut out).is_err());
}

#[test]
fn like_uses_pattern_verbatim() {
    let u = users();
    let p = u.first_name.like("%@company.com");
    assert_eq!(
        literal::predicate_sql(&p).unwrap(),
        "(user.firstName LIKE '%@company.com')"
    );
    assert_eq!(
        extracted(&p),
        vec![Value::Text("%@company.com".into())]
    );
}

#[test]
fn contains_wraps_value_on_both_sides() {
    let u = users();
    let p = u.first_name.contains("oh");
    assert_eq!(
        literal::predicate_sql(&p).unwrap(),
        "(user.firstName LIKE '%oh%')"
    );
    assert_eq!(
        placeholder::predicate_sql(&p).unwrap(),
        "(user.firstName LIKE ?)"
    );
    // the extracted parameter carries the same transform the literal uses
    assert_eq!(extracted(&p), vec![Value::Text("%oh%".into())]);
}

#[test]
fn starts_with_and_ends_with_transforms() {
    let u = users();
    let starts = u.first_name.starts_with("Sm");
    assert_eq!(
        literal::predicate_sql(&starts).unwrap(),
        "(user.firstName LIKE 'Sm%')"
    );
    assert_eq!(extracted(&starts), vec![Value::Text("Sm%".into())]);

    let ends = u.first_name.ends_with("son");
    assert_eq!(
        literal::predicate_sql(&ends).unwrap(),
        "(user.firstName LIKE '%son')"
    );
    assert_eq!(extracted(&ends), vec![Value::Text("%son".into())]);
}

#[test]
fn null_checks_render_as_suffix_keywords() {
    let u = users();
    assert_eq!(
        literal::predicate_sql(&u.city.is_null()).unwrap(),
        "(user.city IS NULL)"
    );
    assert_eq!(
        literal::predicate_sql(&u.city.is_not_null()).unwrap(),
        "(user.city IS NOT NULL)"
    );
    assert!(extracted(&u.city.is_null()).is_empty());
}

#[test]
fn emptiness_expands_to_null_aware_checks() {
    let u = users();
    assert_eq!(
        literal::predicate_sql(&u.city.is_empty()).unwrap(),
        "(user.city = '' OR user.city IS NULL)"
    );
    assert_eq!(
        literal::predicate_sql(&u.city.is_not_empty()).unwrap(),
        "(user.city != '' AND user.city IS NOT NULL)"
    );
}

#[test]
fn logical_combinators_preserve_parenthesization() {
    let u = users();
    let p = u.first_name.eq("John").and(u.city.eq("Boston").not());
    assert_eq!(
        literal::predicate_sql(&p).unwrap(),
        "((user.firstName = 'John') AND (NOT (user.city = 'Boston')))"
    );
}

#[test]
fn or_renders_both_sides_as_expressions() {
    let u = users();
    let p = u.city.eq("New York").or(u.city.eq("Boston"));
    assert_eq!(
        literal::predicate_sql(&p).unwrap(),
        "((user.city = 'New York') OR (user.city = 'Boston'))"
    );
    assert_eq!(placeholder::predicate_sql(&p).unwrap(), "((user.city = ?) OR (user.city = ?))");
    assert_eq!(
        extracted(&p),
        vec![Value::Text("New York".into()), Value::Text("Boston".into())]
    );
}

#[test]
fn column_to_column_comparison_is_never_parameterized() {
    let table = EntityPath::<User>::new("u");
    let other = EntityPath::<User>::new("o");
    let p = table.number::<i64>("id").eq_path(&other.number::<i64>("userId"));
    assert_eq!(literal::predicate_sql(&p).unwrap(), "(u.id = o.userId)");
    assert_eq!(placeholder::predicate_sql(&p).unwrap(), "(u.id = o.userId)");
    assert!(extracted(&p).is_empty());
}

#[test]
fn aggregate_rendering() {
    let u = users();
    assert_eq!(literal::expr_sql(&count_all()).unwrap(), "COUNT(*)");
    assert_eq!(literal::expr_sql(&u.age.avg().expr()).unwrap(), "AVG(user.age)");
    assert_eq!(literal::expr_sql(&u.age.sum().expr()).unwrap(), "SUM(user.age)");
    assert_eq!(literal::expr_sql(&u.age.min().expr()).unwrap(), "MIN(user.age)");
    assert_eq!(literal::expr_sql(&u.age.max().expr()).unwrap(), "MAX(user.age)");
    assert_eq!(literal::expr_sql(&u.age.count().expr()).unwrap(), "COUNT(user.age)");
}

#[test]
fn aggregate_in_having_predicate() {
    let u = users();
    let p = u.age.avg().gt(40.0);
    assert_eq!(literal::predicate_sql(&p).unwrap(), "(AVG(user.age) > 40)");
    assert_eq!(placeholder::predicate_sql(&p).unwrap(), "(AVG(user.age) > ?)");
    assert_eq!(extracted(&p), vec![Value::Float(40.0)]);
}

#[test]
fn case_renders_arms_top_to_bottom() {
    let u = users();
    let case = case_when(u.age.lt(18), "Minor")
        .when(u.age.between(18, 65), "Adult")
        .otherwise("Senior");
    let sql = literal::expr_sql(&case.clone().into_expr()).unwrap();
    assert_eq!(
        sql,
        "CASE WHEN (user.age < 18) THEN 'Minor' \
         WHEN (user.age BETWEEN 18 AND 65) THEN 'Adult' ELSE 'Senior' END"
    );
}

#[test]
fn case_without_else_omits_else_arm() {
    let u = users();
    let case = case_when(u.age.lt(18), "Minor").end();
    let sql = literal::expr_sql(&case.into_expr()).unwrap();
    assert_eq!(sql, "CASE WHEN (user.age < 18) THEN 'Minor' END");
}

#[test]
fn case_conditions_are_parameterized_but_constants_stay_inline() {
    let u = users();
    let case = case_when(u.age.lt(18), "Minor")
        .when(u.age.between(18, 65), "Adult")
        .otherwise("Senior");
    let expr = case.into_expr();
    let sql = placeholder::expr_sql(&expr).unwrap();
    assert_eq!(
        sql,
        "CASE WHEN (user.age < ?) THEN 'Minor' \
         WHEN (user.age BETWEEN ? AND ?) THEN 'Adult' ELSE 'Senior' END"
    );
    let mut out = Vec::new();
    params::collect_expr(&expr, &mut out).unwrap();
    assert_eq!(out, vec![Value::Int(18), Value::Int(18), Value::Int(65)]);
    assert_eq!(count_placeholders(&sql), out.len());
}

#[test]
fn placeholder_count_matches_parameter_count_for_nested_trees() {
    let u = users();
    let p = u
        .first_name
        .contains("oh")
        .and(u.age.between(18, 65).or(u.city.in_list(["A", "B", "C"])))
        .and(u.city.is_not_empty().not())
        .or(u.first_name.eq("John").not());
    let sql = placeholder::predicate_sql(&p).unwrap();
    assert_eq!(count_placeholders(&sql), extracted(&p).len());
    assert_eq!(extracted(&p).len(), 7);
}

#[test]
fn compilation_is_idempotent() {
    let u = users();
    let p = u.first_name.contains("oh").and(u.age.between(1, 2));
    assert_eq!(
        literal::predicate_sql(&p).unwrap(),
        literal::predicate_sql(&p).unwrap()
    );
    assert_eq!(
        placeholder::predicate_sql(&p).unwrap(),
        placeholder::predicate_sql(&p).unwrap()
    );
    assert_eq!(extracted(&p), extracted(&p));
}

#[test]
fn literal_escapes_embedded_quotes() {
    let u = users();
    assert_eq!(
        literal::predicate_sql(&u.first_name.eq("O'Brien")).unwrap(),
        "(user.firstName = 'O''Brien')"
    );
}

#[test]
fn count_placeholders_ignores_quoted_question_marks() {
    assert_eq!(count_placeholders("a = ? AND b = 'wh?t'"), 1);
    assert_eq!(count_placeholders("a = '??' AND b = ?"), 1);
    assert_eq!(count_placeholders("a = 'it''s ?' AND b = ?"), 1);
}

#[test]
fn number_placeholders_rewrites_in_order() {
    assert_eq!(
        number_placeholders("(a = ? AND b = ?)"),
        "(a = $1 AND b = $2)"
    );
    assert_eq!(
        number_placeholders("a = 'wh?t' AND b = ?"),
        "a = 'wh?t' AND b = $1"
    );
    assert_eq!(
        number_placeholders("a = 'it''s ?' AND b = ?"),
        "a = 'it''s ?' AND b = $1"
    );
}

#[test]
fn null_comparison_value_is_permitted() {
    let u = users();
    let p = crate::predicate::eq(&u.city, Value::Null);
    assert_eq!(literal::predicate_sql(&p).unwrap(), "(user.city = NULL)");
    assert_eq!(extracted(&p), vec![Value::Null]);
}
