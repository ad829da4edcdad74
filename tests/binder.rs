#[cfg(test)]
mod tests {
    use bindery::{Binder, Binding, BindingType, GENERATED_SEED, Param, Value};
    use log::LevelFilter;
    use std::{borrow::Cow, env};

    fn init_logs() {
        let mut logger = env_logger::builder();
        logger
            .is_test(true)
            .format_file(true)
            .format_line_number(true);
        if env::var("RUST_LOG").is_err() {
            logger.filter_level(LevelFilter::Warn);
        }
        let _ = logger.try_init();
    }

    fn varchar(value: &'static str) -> Value {
        Value::Varchar(Some(Cow::Borrowed(value)))
    }

    #[test]
    fn bind_named() {
        init_logs();
        let mut binder = Binder::new();
        binder.bind(":name", "Alice", Some("string".into()));
        assert_eq!(binder.len(), 1);
        let (key, binding) = binder.bindings().first().unwrap();
        assert_eq!(*key, Param::Name(":name".into()));
        assert_eq!(
            *binding,
            Binding {
                value: varchar("Alice"),
                ty: Some(BindingType::Name("string".into())),
                placeholder: Param::Name("name".into()),
            }
        );
        assert_eq!(binder.placeholder("c"), ":c0");
    }

    #[test]
    fn bind_positional() {
        init_logs();
        let mut binder = Binder::new();
        binder
            .bind(0_u64, 10_i32, None)
            .bind(1_u64, 20_i64, Some(BindingType::Code(2)));
        assert_eq!(binder.len(), 2);
        let first = binder.get(0_u64).unwrap();
        assert_eq!(first.placeholder, Param::Position(0));
        assert_eq!(first.value, Value::Int32(Some(10)));
        assert_eq!(first.ty, None);
        let second = binder.get(1_u64).unwrap();
        assert_eq!(second.placeholder, Param::Position(1));
        assert_eq!(second.value, Value::Int64(Some(20)));
        assert_eq!(second.ty, Some(BindingType::Code(2)));
    }

    #[test]
    fn bind_strips_first_character() {
        let mut binder = Binder::new();
        binder.bind("name", 1_i32, None).bind("", 2_i32, None);
        assert_eq!(
            binder.get("name").unwrap().placeholder,
            Param::Name("ame".into())
        );
        assert_eq!(binder.get("").unwrap().placeholder, Param::Name("".into()));
    }

    #[test]
    fn rebind_last_write_wins() {
        init_logs();
        let mut binder = Binder::new();
        binder
            .bind(":a", 1_i32, Some("integer".into()))
            .bind(":b", 2_i32, None)
            .bind(":a", "one", Some("string".into()));
        assert_eq!(binder.len(), 2);
        let a = binder.get(":a").unwrap();
        assert_eq!(a.value, varchar("one"));
        assert_eq!(a.ty, Some("string".into()));
        let keys: Vec<_> = binder.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, [":a", ":b"]);
    }

    #[test]
    fn placeholder_manufactures_names() {
        let mut binder = Binder::new();
        assert_eq!(binder.placeholder("c"), ":c0");
        assert_eq!(binder.placeholder("c"), ":c1");
        assert_eq!(binder.placeholder("name"), ":name2");
        assert_eq!(binder.counter(), 3);
        assert!(binder.is_empty());
    }

    #[test]
    fn placeholder_pass_through_advances_counter() {
        let mut binder = Binder::new();
        assert_eq!(binder.placeholder(":x"), ":x");
        assert_eq!(binder.placeholder("?"), "?");
        assert_eq!(binder.placeholder("c"), ":c2");
        assert!(binder.is_empty());
    }

    #[test]
    fn generate_many_named() {
        init_logs();
        let mut binder = Binder::new();
        let placeholders = binder.generate_many_named(
            [("a", 1_i64), ("b", 2_i64), ("c", 3_i64)],
            Some("int".into()),
        );
        let pairs: Vec<_> = placeholders
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        assert_eq!(pairs, [("a", ":c0"), ("b", ":c1"), ("c", ":c2")]);
        assert_eq!(binder.len(), 3);
        for (i, (key, binding)) in binder.iter().enumerate() {
            assert_eq!(key.to_string(), format!(":{GENERATED_SEED}{i}"));
            assert_eq!(binding.placeholder.to_string(), format!("{GENERATED_SEED}{i}"));
            assert_eq!(binding.value, Value::Int64(Some(i as i64 + 1)));
            assert_eq!(binding.ty, Some(BindingType::Name("int".into())));
        }
    }

    #[test]
    fn generate_many_continues_numbering() {
        let mut binder = Binder::new();
        binder.bind(":status", "active", None);
        assert_eq!(binder.placeholder("name"), ":name0");
        let ids = binder.generate_many(vec![7_u32, 8, 9], None);
        assert_eq!(ids, [":c1", ":c2", ":c3"]);
        assert_eq!(binder.len(), 4);
        assert_eq!(binder.get(":c2").unwrap().value, Value::UInt32(Some(8)));
        assert!(binder.generate_many(Vec::<u32>::new(), None).is_empty());
        assert_eq!(binder.counter(), 4);
    }

    #[test]
    fn generate_many_named_repeated_key() {
        let mut binder = Binder::new();
        let placeholders =
            binder.generate_many_named([("a", 1_i32), ("b", 2_i32), ("a", 3_i32)], None);
        let pairs: Vec<_> = placeholders
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        assert_eq!(pairs, [("a", ":c0"), ("b", ":c1")]);
        // Every binding is reachable through a returned placeholder
        assert_eq!(binder.len(), 2);
        for placeholder in placeholders.values() {
            assert!(binder.get(placeholder.clone()).is_some());
        }
        assert_eq!(binder.get(":c0").unwrap().value, Value::Int32(Some(3)));
        assert_eq!(binder.placeholder("c"), ":c2");
    }

    #[test]
    fn param_accessors() {
        let mut binder = Binder::new();
        binder.bind(2_u64, 1_i32, None).bind(":id", 2_i32, None);
        let keys: Vec<_> = binder.bindings().keys().collect();
        assert!(keys[0].is_positional());
        assert_eq!(keys[0].as_position(), Some(2));
        assert_eq!(keys[0].as_name(), None);
        assert!(!keys[1].is_positional());
        assert_eq!(keys[1].as_position(), None);
        assert_eq!(keys[1].as_name(), Some(":id"));
        assert_eq!(binder.get(":id").unwrap().placeholder.as_name(), Some("id"));
    }

    #[test]
    fn generated_names_can_collide_with_manual_bindings() {
        let mut binder = Binder::new();
        binder.bind(":c0", "manual", None);
        let generated = binder.generate_many(["generated"], None);
        assert_eq!(generated, [":c0"]);
        assert_eq!(binder.len(), 1);
        assert_eq!(binder.get(":c0").unwrap().value, varchar("generated"));
    }

    #[test]
    fn reset() {
        let mut binder = Binder::new();
        binder.bind(":a", 1_i32, None);
        binder.generate_many([true, false], None);
        assert_eq!(binder.len(), 3);
        binder.reset();
        assert!(binder.is_empty());
        assert_eq!(binder.counter(), 0);
        assert_eq!(binder.placeholder("c"), ":c0");
    }

    #[test]
    fn reset_count() {
        let mut binder = Binder::new();
        binder.generate_many([1_i32, 2], Some("integer".into()));
        binder.reset_count();
        assert_eq!(binder.len(), 2);
        assert_eq!(binder.placeholder("c"), ":c0");
        assert_eq!(binder.get(":c1").unwrap().value, Value::Int32(Some(2)));
    }

    #[test]
    fn bindings_view_does_not_share_state() {
        let mut binder = Binder::new();
        binder.bind(":a", 1_i32, None);
        let mut copy = binder.clone();
        copy.bind(":b", 2_i32, None);
        assert_eq!(copy.placeholder("c"), ":c0");
        assert_eq!(binder.len(), 1);
        assert_eq!(binder.counter(), 0);
        let view = binder.bindings();
        assert!(view.contains_key(&Param::Name(":a".into())));
        assert!(!view.contains_key(&Param::Name(":b".into())));
    }

    #[test]
    fn nested_helpers_share_the_binder() {
        fn condition(binder: &mut Binder, column: &str, value: i64) -> String {
            let placeholder = binder.placeholder(column);
            binder.bind(placeholder.clone(), value, Some("integer".into()));
            format!("{column} = {placeholder}")
        }
        let mut binder = Binder::new();
        let sql = format!(
            "SELECT * FROM orders WHERE {} AND {}",
            condition(&mut binder, "customer", 3),
            condition(&mut binder, "customer", 4),
        );
        assert_eq!(
            sql,
            "SELECT * FROM orders WHERE customer = :customer0 AND customer = :customer1"
        );
        assert_eq!(
            binder.get(":customer1").unwrap().placeholder,
            Param::Name("customer1".into())
        );
    }

    #[test]
    fn debug_dump() {
        let mut binder = Binder::new();
        binder.bind(":id", 5_i32, None);
        let dump = format!("{binder:?}");
        assert!(dump.contains("counter: 0"));
        assert!(dump.contains("Int32(Some(5))"));
    }
}
