use employee_core::Employee;
use serde_json::json;

#[test]
fn new_employee_is_not_persisted() {
    let employee = Employee::new("Banana", "Kim", "banana@gmail.com");

    assert_eq!(employee.id, None);
    assert!(!employee.is_persisted());
    assert_eq!(employee.first_name, "Banana");
    assert_eq!(employee.last_name, "Kim");
    assert_eq!(employee.email, "banana@gmail.com");
}

#[test]
fn serialization_uses_camel_case_wire_fields() {
    let employee = Employee::with_id(7, "Banana", "Kim", "banana@gmail.com");

    let value = serde_json::to_value(&employee).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 7,
            "firstName": "Banana",
            "lastName": "Kim",
            "email": "banana@gmail.com"
        })
    );
}

#[test]
fn unsaved_employee_omits_id_on_the_wire() {
    let employee = Employee::new("Park", "JiYun", "parkJiyun@gmail.com");
    let value = serde_json::to_value(&employee).unwrap();
    assert!(value.get("id").is_none());
}

#[test]
fn deserialization_accepts_body_without_id() {
    let employee: Employee = serde_json::from_value(json!({
        "firstName": "Kim",
        "lastName": "EnJu",
        "email": "kimEnju@gmail.com"
    }))
    .unwrap();

    assert_eq!(employee, Employee::new("Kim", "EnJu", "kimEnju@gmail.com"));
}

#[test]
fn deserialization_rejects_missing_email() {
    let result = serde_json::from_value::<Employee>(json!({
        "firstName": "Kim",
        "lastName": "EnJu"
    }));
    assert!(result.is_err());
}
