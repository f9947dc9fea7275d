use super::*;

#[test]
fn distance_is_euclidean_in_three_dimensions() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(4.0, 6.0, 15.0);
    assert!((a.distance(b) - 13.0).abs() < f64::EPSILON);
}

#[test]
fn normalized_rejects_zero_vector() {
    assert_eq!(Vector3::ZERO.normalized(), None);
    let unit = Vector3::new(0.0, 3.0, 4.0).normalized();
    assert!(unit.is_some_and(|u| (u.length() - 1.0).abs() < 1e-12 && u.y < u.z));
}

#[test]
fn value_types_and_accessors() {
    assert_eq!(Value::Null.value_type(), None);
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::Number(2.0).value_type(), Some(ValueType::Number));
    assert_eq!(Value::Entity(EntityRef(7)).as_entity(), Some(EntityRef(7)));
    assert_eq!(Value::Number(2.0).as_entity(), None);
    assert_eq!(
        Value::Vector(Vector3::new(1.0, 0.0, 0.0)).as_vector(),
        Some(Vector3::new(1.0, 0.0, 0.0))
    );
}

#[test]
fn display_formats() {
    assert_eq!(Value::Number(1.5).to_string(), "1.5");
    assert_eq!(Value::Entity(EntityRef(3)).to_string(), "entity#3");
    assert_eq!(Value::Vector(Vector3::new(1.0, 2.0, 3.0)).to_string(), "[1, 2, 3]");
}
