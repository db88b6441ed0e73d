use sql_dal::prelude::*;

fn placeholders(sql: &str) -> usize {
    sql.matches('?').count()
}

#[test]
fn equality_conditions_compile_in_insertion_order() {
    let conditions = ConditionSet::new()
        .with("name", Condition::Equals(SqlValue::Text("alice".into())))
        .with("age", Condition::Equals(SqlValue::Int(33)));
    let stmt = compile_conditions(&conditions).unwrap();
    assert_eq!(stmt.sql, "`name` = ? AND `age` = ?");
    assert_eq!(
        stmt.params,
        vec![SqlValue::Text("alice".into()), SqlValue::Int(33)]
    );
    assert_eq!(stmt.types, vec![BindType::Text, BindType::Integer]);
}

#[test]
fn placeholder_count_always_matches_params_and_types() {
    let conditions = ConditionSet::new()
        .with(
            "id",
            Condition::In(vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]),
        )
        .with(
            "age",
            Condition::Between(SqlValue::Int(25), SqlValue::Int(35)),
        )
        .with(
            "name",
            Condition::Compare(CompareOp::Like, SqlValue::Text("a%".into())),
        )
        .with("active", Condition::Equals(SqlValue::Bool(true)));
    let stmt = compile_conditions(&conditions).unwrap();
    assert_eq!(placeholders(&stmt.sql), stmt.params.len());
    assert_eq!(stmt.params.len(), stmt.types.len());
    assert_eq!(stmt.params.len(), 7);
}

#[test]
fn membership_emits_one_placeholder_per_value() {
    let conditions = ConditionSet::new().with(
        "id",
        Condition::In(vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]),
    );
    let stmt = compile_conditions(&conditions).unwrap();
    assert_eq!(stmt.sql, "`id` IN (?, ?, ?)");
}

#[test]
fn empty_membership_list_is_rejected() {
    let conditions = ConditionSet::new().with("id", Condition::In(vec![]));
    let err = compile_conditions(&conditions).unwrap_err();
    assert!(matches!(err, DbError::CompileError(_)));
}

#[test]
fn between_binds_low_then_high_without_swapping() {
    let conditions = ConditionSet::new().with(
        "age",
        Condition::Between(SqlValue::Int(35), SqlValue::Int(25)),
    );
    let stmt = compile_conditions(&conditions).unwrap();
    assert_eq!(stmt.sql, "`age` BETWEEN ? AND ?");
    // Caller's order is preserved even when low > high.
    assert_eq!(stmt.params, vec![SqlValue::Int(35), SqlValue::Int(25)]);
}

#[test]
fn comparison_operator_comes_from_the_allow_list() {
    let conditions = ConditionSet::new().with(
        "age",
        Condition::Compare(CompareOp::GtEq, SqlValue::Int(21)),
    );
    let stmt = compile_conditions(&conditions).unwrap();
    assert_eq!(stmt.sql, "`age` >= ?");

    assert!(matches!(
        CompareOp::parse("; DROP TABLE users; --"),
        Err(DbError::CompileError(_))
    ));
}

#[test]
fn select_defaults_to_star_and_omits_where() {
    let stmt = build_select("users", &[], &ConditionSet::new(), &SelectOptions::default()).unwrap();
    assert_eq!(stmt.sql, "SELECT * FROM `users`");
    assert!(stmt.params.is_empty());
}

#[test]
fn select_between_scenario() {
    let conditions = ConditionSet::new().with(
        "age",
        Condition::Between(SqlValue::Int(25), SqlValue::Int(35)),
    );
    let stmt = build_select("users", &["*"], &conditions, &SelectOptions::default()).unwrap();
    assert_eq!(stmt.sql, "SELECT * FROM `users` WHERE `age` BETWEEN ? AND ?");
    assert_eq!(stmt.params, vec![SqlValue::Int(25), SqlValue::Int(35)]);
}

#[test]
fn select_options_append_structurally() {
    let conditions = ConditionSet::new().with("active", Condition::Equals(SqlValue::Bool(true)));
    let options = SelectOptions::new()
        .order_by("`age` DESC")
        .limit(10)
        .offset(20);
    let stmt = build_select("users", &["id", "name"], &conditions, &options).unwrap();
    assert_eq!(
        stmt.sql,
        "SELECT id, name FROM `users` WHERE `active` = ? ORDER BY `age` DESC LIMIT 10 OFFSET 20"
    );
    // LIMIT/OFFSET are spliced, not bound.
    assert_eq!(stmt.params.len(), 1);
}

#[test]
fn offset_without_limit_is_ignored() {
    let stmt = build_select(
        "users",
        &[],
        &ConditionSet::new(),
        &SelectOptions::new().offset(5),
    )
    .unwrap();
    assert_eq!(stmt.sql, "SELECT * FROM `users`");
}

#[test]
fn insert_emits_one_placeholder_per_column() {
    let values = ValueMap::new()
        .set("a", SqlValue::Int(1))
        .set("b", SqlValue::Text("x".into()));
    let stmt = build_insert("t", &values).unwrap();
    assert_eq!(stmt.sql, "INSERT INTO `t` (`a`, `b`) VALUES (?, ?)");
    assert_eq!(placeholders(&stmt.sql), values.len());
}

#[test]
fn insert_rejects_an_empty_value_map() {
    assert!(matches!(
        build_insert("t", &ValueMap::new()),
        Err(DbError::CompileError(_))
    ));
}

#[test]
fn update_orders_set_params_before_where_params() {
    let values = ValueMap::new()
        .set("name", SqlValue::Text("bob".into()))
        .set("age", SqlValue::Int(40));
    let conditions = ConditionSet::new().with("id", Condition::Equals(SqlValue::Int(7)));
    let stmt = build_update("users", &values, &conditions).unwrap();
    assert_eq!(
        stmt.sql,
        "UPDATE `users` SET `name` = ?, `age` = ? WHERE `id` = ?"
    );
    assert_eq!(
        stmt.params,
        vec![
            SqlValue::Text("bob".into()),
            SqlValue::Int(40),
            SqlValue::Int(7)
        ]
    );
}

#[test]
fn update_rejects_empty_maps() {
    let conditions = ConditionSet::new().with("id", Condition::Equals(SqlValue::Int(1)));
    assert!(matches!(
        build_update("t", &ValueMap::new(), &conditions),
        Err(DbError::CompileError(_))
    ));

    let values = ValueMap::new().set("a", SqlValue::Int(1));
    assert!(matches!(
        build_update("t", &values, &ConditionSet::new()),
        Err(DbError::CompileError(_))
    ));
}

#[test]
fn delete_guards_against_full_table_mutation() {
    assert!(matches!(
        build_delete("t", &ConditionSet::new()),
        Err(DbError::CompileError(_))
    ));

    let conditions = ConditionSet::new().with("id", Condition::Equals(SqlValue::Int(1)));
    let stmt = build_delete("t", &conditions).unwrap();
    assert_eq!(stmt.sql, "DELETE FROM `t` WHERE `id` = ?");
}

#[test]
fn upsert_defaults_to_rewriting_all_columns() {
    let values = ValueMap::new()
        .set("email", SqlValue::Text("a@example.com".into()))
        .set("name", SqlValue::Text("alice".into()));
    let stmt = build_upsert("users", &values, None).unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO `users` (`email`, `name`) VALUES (?, ?) \
         ON CONFLICT DO UPDATE SET `email` = excluded.`email`, `name` = excluded.`name`"
    );
}

#[test]
fn upsert_honors_explicit_update_columns() {
    let values = ValueMap::new()
        .set("email", SqlValue::Text("a@example.com".into()))
        .set("name", SqlValue::Text("alice".into()));
    let stmt = build_upsert("users", &values, Some(&["name"])).unwrap();
    assert!(stmt.sql.ends_with("ON CONFLICT DO UPDATE SET `name` = excluded.`name`"));
}

#[test]
fn hostile_identifiers_are_rejected_everywhere() {
    assert!(build_select("users; --", &[], &ConditionSet::new(), &SelectOptions::default()).is_err());

    let conditions = ConditionSet::new().with(
        "name`; DROP TABLE users; --",
        Condition::Equals(SqlValue::Int(1)),
    );
    assert!(compile_conditions(&conditions).is_err());

    let values = ValueMap::new().set("a b", SqlValue::Int(1));
    assert!(build_insert("t", &values).is_err());
}

#[test]
fn raw_statements_infer_type_tags() {
    let stmt = Statement::from_parts(
        "SELECT * FROM t WHERE a = ? AND b = ?",
        &[SqlValue::Bool(true), SqlValue::Null],
    );
    assert_eq!(stmt.types, vec![BindType::Integer, BindType::Text]);
}
