use crate::Tag;

pub mod builder;

mod de;
mod schema;


macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
        LongArray = 12,
    }
}

#[test]
fn tag_from_u8_rejects_out_of_range() {
    use std::convert::TryFrom;

    for b in 0..=12u8 {
        assert!(Tag::try_from(b).is_ok());
    }
    for b in 13..=255u8 {
        assert!(Tag::try_from(b).is_err());
    }
}
