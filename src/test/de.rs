use crate::de;
use crate::error::Error;
use crate::test::builder::Builder;
use crate::{Endian, NbtFile, Tag, Value};

#[test]
fn simple_members() {
    let payload = Builder::new()
        .start_compound("")
        .byte("abc", 123)
        .short("s", -300)
        .int("i", 70000)
        .long("l", 1 << 40)
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Big).unwrap();
    assert_eq!(root.len(), 4);
    assert_eq!(root.get("abc"), Some(&Value::Byte(123)));
    assert_eq!(root.get("s"), Some(&Value::Short(-300)));
    assert_eq!(root.get("i"), Some(&Value::Int(70000)));
    assert_eq!(root.get("l"), Some(&Value::Long(1 << 40)));
}

#[test]
fn floats_and_strings() {
    let payload = Builder::new()
        .start_compound("")
        .float("f", 1.5)
        .double("d", -2.25)
        .string("s", "überminecraft")
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Big).unwrap();
    assert_eq!(root.get("f"), Some(&Value::Float(1.5)));
    assert_eq!(root.get("d"), Some(&Value::Double(-2.25)));
    assert_eq!(
        root.get("s"),
        Some(&Value::String("überminecraft".to_string()))
    );
}

#[test]
fn root_name_is_skipped_not_decoded() {
    // The root's name bytes are skipped without UTF-8 validation, so a
    // garbage name does not fail the parse.
    let payload = Builder::new()
        .tag(Tag::Compound)
        .raw_bytes(&[0x00, 0x02, 0xff, 0xfe])
        .int("a", 1)
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Big).unwrap();
    assert_eq!(root.get("a"), Some(&Value::Int(1)));
}

#[test]
fn nested_compounds() {
    let payload = Builder::new()
        .start_compound("")
        .start_compound("inner")
        .int("x", 1)
        .end_compound()
        .int("after", 2)
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Big).unwrap();
    match root.get("inner") {
        Some(Value::Compound(inner)) => {
            assert_eq!(inner.get("x"), Some(&Value::Int(1)));
        }
        other => panic!("expected inner compound, got {:?}", other),
    }
    assert_eq!(root.get("after"), Some(&Value::Int(2)));
}

#[test]
fn list_of_compounds() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("rows", Tag::Compound, 2)
        .start_anon_compound()
        .int("x", 1)
        .end_anon_compound()
        .start_anon_compound()
        .int("x", 2)
        .end_anon_compound()
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Big).unwrap();
    match root.get("rows") {
        Some(Value::List(rows)) => {
            assert_eq!(rows.element_tag(), Tag::Compound);
            assert_eq!(rows.len(), 2);
            match rows.get(1) {
                Some(Value::Compound(row)) => assert_eq!(row.get("x"), Some(&Value::Int(2))),
                other => panic!("expected compound row, got {:?}", other),
            }
        }
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn arrays() {
    let payload = Builder::new()
        .start_compound("")
        .byte_array("bs", &[-1, 0, 1])
        .int_array("is", &[1 << 20, -5])
        .long_array("ls", &[1 << 50])
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Big).unwrap();
    assert_eq!(root.get("bs"), Some(&Value::ByteArray(vec![-1, 0, 1])));
    assert_eq!(root.get("is"), Some(&Value::IntArray(vec![1 << 20, -5])));
    assert_eq!(root.get("ls"), Some(&Value::LongArray(vec![1 << 50])));
}

#[test]
fn empty_list_keeps_declared_element_tag() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("empty", Tag::Int, 0)
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Big).unwrap();
    match root.get("empty") {
        Some(Value::List(list)) => {
            assert_eq!(list.element_tag(), Tag::Int);
            assert!(list.is_empty());
        }
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn duplicate_member_names_last_write_wins() {
    let payload = Builder::new()
        .start_compound("")
        .int("a", 1)
        .int("a", 2)
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Big).unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(root.get("a"), Some(&Value::Int(2)));
}

#[test]
fn little_endian_members() {
    let payload = Builder::little()
        .start_compound("")
        .int("i", 0x01020304)
        .short("s", 0x0102)
        .end_compound()
        .build();

    let root = de::read_root(&payload, Endian::Little).unwrap();
    assert_eq!(root.get("i"), Some(&Value::Int(0x01020304)));
    assert_eq!(root.get("s"), Some(&Value::Short(0x0102)));
}

#[test]
fn truncated_payload_names_the_field() {
    let mut payload = Builder::new()
        .start_compound("")
        .int("i", 1)
        .end_compound()
        .build();
    // Chop the parse off inside the int's payload.
    payload.truncate(payload.len() - 3);

    let err = de::read_root(&payload, Endian::Big).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEod("int payload")));
    assert!(err.is_eod());
}

#[test]
fn truncated_name_names_the_field() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::Int)
        .raw_bytes(&[0x00, 0x10, b'x'])
        .build();

    let err = de::read_root(&payload, Endian::Big).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEod("member name")));
}

#[test]
fn invalid_member_tag() {
    let payload = Builder::new()
        .start_compound("")
        .raw_bytes(&[42])
        .build();

    let err = de::read_root(&payload, Endian::Big).unwrap_err();
    assert!(matches!(err, Error::InvalidTag(42)));
}

#[test]
fn root_must_be_a_compound() {
    let payload = Builder::new().tag(Tag::Int).name("x").int_payload(1).build();

    let err = de::read_root(&payload, Endian::Big).unwrap_err();
    assert!(matches!(err, Error::RootNotCompound(Tag::Int)));
}

#[test]
fn negative_array_length_is_rejected() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::IntArray)
        .name("is")
        .int_payload(-1)
        .end_compound()
        .build();

    let err = de::read_root(&payload, Endian::Big).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEod("int array length")));
}

#[test]
fn huge_declared_array_does_not_allocate() {
    // Length checks run before any allocation sized by the declared count.
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::LongArray)
        .name("ls")
        .int_payload(i32::MAX)
        .end_compound()
        .build();

    let err = de::read_root(&payload, Endian::Big).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEod("long array payload")));
}

#[test]
fn nonunicode_member_name() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::Int)
        .raw_bytes(&[0x00, 0x02, 0xc0, 0x32])
        .int_payload(1)
        .end_compound()
        .build();

    let err = de::read_root(&payload, Endian::Big).unwrap_err();
    assert!(matches!(err, Error::Nonunicode(_)));
}

#[test]
fn nonempty_list_of_end_is_rejected() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("l", Tag::End, 1)
        .end_compound()
        .build();

    let err = de::read_root(&payload, Endian::Big).unwrap_err();
    assert!(matches!(err, Error::InvalidTag(0)));
}

#[test]
fn read_through_nbtfile_wraps_parse_failures_as_format() {
    let err = NbtFile::read(&[0xff, 0x00, 0x12]).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}
