use employee_core::db::open_db_in_memory;
use employee_core::{
    Employee, EmployeeRepository, EmployeeService, InMemoryEmployeeRepository, ServiceError,
    SqliteEmployeeRepository,
};

fn banana() -> Employee {
    Employee::new("Banana", "Kim", "banana@gmail.com")
}

#[test]
fn create_with_fresh_email_assigns_id_and_keeps_fields() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());

    let created = service.create(&banana()).unwrap();

    assert!(created.id.is_some());
    assert_eq!(created.first_name, "Banana");
    assert_eq!(created.last_name, "Kim");
    assert_eq!(created.email, "banana@gmail.com");
}

#[test]
fn create_ignores_client_supplied_id() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());
    let existing = service.create(&banana()).unwrap();

    let mut candidate = Employee::new("Apple", "Lee", "apple@gmail.com");
    candidate.id = existing.id;
    let created = service.create(&candidate).unwrap();

    assert_ne!(created.id, existing.id);
    assert_eq!(service.get_by_id(existing.id.unwrap()).unwrap(), Some(existing));
}

#[test]
fn create_with_existing_email_fails_and_persists_nothing() {
    let repo = InMemoryEmployeeRepository::new();
    let service = EmployeeService::new(repo);
    service.create(&banana()).unwrap();

    let err = service
        .create(&Employee::new("Other", "Name", "banana@gmail.com"))
        .unwrap_err();

    match err {
        ServiceError::DuplicateResource { email } => assert_eq!(email, "banana@gmail.com"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.list_all().unwrap().len(), 1);
}

#[test]
fn storage_level_duplicate_maps_to_duplicate_resource() {
    // No pre-check on update; the UNIQUE constraint is the only guard here.
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    repo.save(&banana()).unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let mut taken = service
        .create(&Employee::new("Apple", "Lee", "apple@gmail.com"))
        .unwrap();
    taken.email = "banana@gmail.com".to_string();
    let err = service.update(&taken).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::DuplicateResource { ref email } if email == "banana@gmail.com"
    ));
}

#[test]
fn list_all_returns_every_record_or_empty() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());
    assert!(service.list_all().unwrap().is_empty());

    service
        .create(&Employee::new("Park", "JiYun", "parkJiyun@gmail.com"))
        .unwrap();
    service
        .create(&Employee::new("Kim", "EnJu", "kimEnju@gmail.com"))
        .unwrap();

    assert_eq!(service.list_all().unwrap().len(), 2);
}

#[test]
fn get_by_id_returns_none_for_unknown_id() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());
    assert_eq!(service.get_by_id(1).unwrap(), None);
}

#[test]
fn update_then_get_returns_updated_fields() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());
    let mut employee = service.create(&banana()).unwrap();

    employee.first_name = "banana".to_string();
    employee.email = "apple@gmail.com".to_string();
    let updated = service.update(&employee).unwrap();
    assert_eq!(updated, employee);

    let loaded = service.get_by_id(employee.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.first_name, "banana");
    assert_eq!(loaded.email, "apple@gmail.com");
}

#[test]
fn delete_then_get_returns_none_and_repeat_delete_succeeds() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());
    let id = service.create(&banana()).unwrap().id.unwrap();

    service.delete_by_id(id).unwrap();
    assert_eq!(service.get_by_id(id).unwrap(), None);
    service.delete_by_id(id).unwrap();
}

#[test]
fn find_by_name_delegates_to_repository() {
    let service = EmployeeService::new(InMemoryEmployeeRepository::new());
    let created = service.create(&banana()).unwrap();

    assert_eq!(service.find_by_name("Banana", "Kim").unwrap(), Some(created));
    assert_eq!(service.find_by_name("Banana", "Lee").unwrap(), None);
}

#[test]
fn duplicate_create_scenario_against_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let created = service.create(&banana()).unwrap();
    assert!(created.id.is_some());

    let err = service.create(&banana()).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateResource { .. }));

    let all = service.list_all().unwrap();
    assert_eq!(all, vec![created]);
}

#[test]
fn update_with_largest_id_persists_on_both_adapters() {
    let employee = Employee::with_id(i64::MAX, "Max", "Id", "max@coffee.com");

    let memory = EmployeeService::new(InMemoryEmployeeRepository::new());
    assert_eq!(memory.update(&employee).unwrap(), employee);
    assert_eq!(memory.get_by_id(i64::MAX).unwrap(), Some(employee.clone()));

    let conn = open_db_in_memory().unwrap();
    let sqlite = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    assert_eq!(sqlite.update(&employee).unwrap(), employee);
    assert_eq!(sqlite.get_by_id(i64::MAX).unwrap(), Some(employee));
}
