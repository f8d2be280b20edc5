use super::*;

fn pool(name: &str) -> ObjectName {
    pool_name(name).unwrap()
}

#[test]
fn test_pool_name_validation() {
    assert_eq!(pool("test_pool").as_str(), "test_pool");
    assert_eq!(pool(r#""My Pool""#).as_str(), r#""My Pool""#);

    for bad in ["db.pool", "1pool", "my pool", ""] {
        let err = pool_name(bad).unwrap_err();
        assert!(matches!(err, SqlError::InvalidName { .. }), "{bad:?}");
        assert!(
            err.to_string()
                .contains(&format!("'{bad}' is not a valid compute pool name.")),
            "{err}"
        );
    }
}

#[test]
fn test_create_defaults() {
    let sql = create(&CreateComputePool::new(pool("test_pool"), "CPU_X64_XS")).unwrap();
    assert_eq!(
        sql,
        "CREATE COMPUTE POOL test_pool\n\
         MIN_NODES = 1\n\
         MAX_NODES = 1\n\
         INSTANCE_FAMILY = CPU_X64_XS\n\
         AUTO_RESUME = TRUE\n\
         INITIALLY_SUSPENDED = FALSE\n\
         AUTO_SUSPEND_SECS = 3600"
    );
}

#[test]
fn test_create_with_all_options() {
    let def = CreateComputePool {
        min_nodes: 2,
        max_nodes: Some(5),
        auto_resume: false,
        initially_suspended: true,
        auto_suspend_secs: 60,
        comment: Some("it's a pool".to_string()),
        ..CreateComputePool::new(pool("test_pool"), "GPU_NV_S")
    };
    let sql = create(&def).unwrap();
    let lines: Vec<&str> = sql.lines().collect();
    assert_eq!(lines[1], "MIN_NODES = 2");
    assert_eq!(lines[2], "MAX_NODES = 5");
    assert_eq!(lines[4], "AUTO_RESUME = FALSE");
    assert_eq!(lines[5], "INITIALLY_SUSPENDED = TRUE");
    assert_eq!(lines[6], "AUTO_SUSPEND_SECS = 60");
    assert_eq!(lines[7], r"COMMENT = 'it\'s a pool'");
}

#[test]
fn test_create_max_defaults_to_min() {
    let def = CreateComputePool {
        min_nodes: 3,
        ..CreateComputePool::new(pool("p"), "CPU_X64_XS")
    };
    assert_eq!(def.resolved_max_nodes().unwrap(), 3);
    assert!(create(&def).unwrap().contains("MAX_NODES = 3"));
}

#[test]
fn test_create_invalid_node_range() {
    let def = CreateComputePool {
        min_nodes: 2,
        max_nodes: Some(1),
        ..CreateComputePool::new(pool("p"), "CPU_X64_XS")
    };
    let err = create(&def).unwrap_err();
    assert!(matches!(err, SqlError::InvalidNodeRange { min: 2, max: 1 }));
    assert!(err
        .to_string()
        .contains("max_nodes must be greater or equal to min_nodes"));
}

#[test]
fn test_create_rejects_zero_min_nodes() {
    let def = CreateComputePool {
        min_nodes: 0,
        max_nodes: Some(1),
        ..CreateComputePool::new(pool("p"), "CPU_X64_XS")
    };
    let err = create(&def).unwrap_err();
    assert!(err.to_string().contains("min_nodes must be positive"));
}

#[test]
fn test_create_rejects_bad_family() {
    let def = CreateComputePool::new(pool("p"), "CPU; DROP");
    assert!(matches!(create(&def), Err(SqlError::InvalidValue(_))));
}

#[test]
fn test_state_changes() {
    let name = pool("test_pool");
    assert_eq!(stop_all(&name), "ALTER COMPUTE POOL test_pool STOP ALL");
    assert_eq!(suspend(&name), "ALTER COMPUTE POOL test_pool SUSPEND");
    assert_eq!(resume(&name), "ALTER COMPUTE POOL test_pool RESUME");
}

#[test]
fn test_set_properties() {
    let props = SetComputePool {
        min_nodes: Some(2),
        max_nodes: Some(3),
        auto_resume: Some(false),
        auto_suspend_secs: Some(120),
        comment: Some("new comment".to_string()),
    };
    let sql = set(&pool("test_pool"), &props).unwrap();
    assert_eq!(
        sql,
        "ALTER COMPUTE POOL test_pool SET\n\
         MIN_NODES = 2\n\
         MAX_NODES = 3\n\
         AUTO_RESUME = FALSE\n\
         AUTO_SUSPEND_SECS = 120\n\
         COMMENT = 'new comment'"
    );
}

#[test]
fn test_set_single_property() {
    let props = SetComputePool {
        auto_resume: Some(true),
        ..Default::default()
    };
    assert_eq!(
        set(&pool("p"), &props).unwrap(),
        "ALTER COMPUTE POOL p SET\nAUTO_RESUME = TRUE"
    );
}

#[test]
fn test_set_nothing() {
    let err = set(&pool("test_pool"), &SetComputePool::default()).unwrap_err();
    assert!(matches!(err, SqlError::NoPropertiesProvided(_)));
    assert!(err.to_string().contains(
        "No properties specified for compute pool 'test_pool'. Please provide at least one property to set."
    ));
}

#[test]
fn test_set_invalid_range() {
    let props = SetComputePool {
        min_nodes: Some(4),
        max_nodes: Some(2),
        ..Default::default()
    };
    assert!(matches!(
        set(&pool("p"), &props),
        Err(SqlError::InvalidNodeRange { min: 4, max: 2 })
    ));
}

#[test]
fn test_unset_properties() {
    let all = UnsetComputePool {
        auto_resume: true,
        auto_suspend_secs: true,
        comment: true,
    };
    assert_eq!(
        unset(&pool("test_pool"), &all).unwrap(),
        "ALTER COMPUTE POOL test_pool UNSET AUTO_RESUME,AUTO_SUSPEND_SECS,COMMENT"
    );

    let comment_only = UnsetComputePool {
        comment: true,
        ..Default::default()
    };
    assert_eq!(
        unset(&pool("test_pool"), &comment_only).unwrap(),
        "ALTER COMPUTE POOL test_pool UNSET COMMENT"
    );
}

#[test]
fn test_unset_nothing() {
    let err = unset(&pool("test_pool"), &UnsetComputePool::default()).unwrap_err();
    assert!(err
        .to_string()
        .contains("Please provide at least one property to reset to its default value."));
}

#[test]
fn test_status() {
    assert_eq!(
        status(&pool("test_pool")),
        "CALL SYSTEM$GET_COMPUTE_POOL_STATUS('test_pool')"
    );
    assert_eq!(
        status(&pool(r#""My Pool""#)),
        r#"CALL SYSTEM$GET_COMPUTE_POOL_STATUS('"My Pool"')"#
    );
}
