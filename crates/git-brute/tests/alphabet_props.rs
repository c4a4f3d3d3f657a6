use git_brute::field::{self, FieldDescriptor};
use git_brute::Alphabet;
use git_object::{ObjectBuffer, ObjectType};
use proptest::prelude::*;

fn alphabet_strategy() -> impl Strategy<Value = Alphabet> {
    prop::sample::select(vec![
        "01",
        "0123456789",
        "0123456789abcdef",
        "abcdefghijklmnopqrstuvwxyz0123456789",
        "!#%&*+-<=>?@^_~",
    ])
    .prop_map(|symbols| Alphabet::new(symbols).unwrap())
}

fn commit_with_field(alphabet: &Alphabet) -> (ObjectBuffer, FieldDescriptor) {
    let mut buf = ObjectBuffer::new(
        ObjectType::Commit,
        b"tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\nauthor A\n\nbody\n",
    );
    let field = field::locate_or_create(&mut buf, "nonce", alphabet).unwrap();
    (buf, field)
}

proptest! {
    #[test]
    fn rendered_value_reads_back(alphabet in alphabet_strategy(), value in 1u64..) {
        let (mut buf, field) = commit_with_field(&alphabet);
        let field = field::render(&mut buf, field, &alphabet, value);
        prop_assert_eq!(alphabet.read(field.value(&buf)), Some(value));
        prop_assert_eq!(field.width(), alphabet.width_of(value));
    }

    #[test]
    fn rerender_after_wider_value_reads_back(
        alphabet in alphabet_strategy(),
        wide in 1u64..,
        narrow in 1u64..1000,
    ) {
        let (mut buf, field) = commit_with_field(&alphabet);
        let field = field::render(&mut buf, field, &alphabet, wide);
        let field = field::render(&mut buf, field, &alphabet, narrow);
        prop_assert_eq!(alphabet.read(field.value(&buf)), Some(narrow));
    }

    #[test]
    fn growth_multiplies_capacity_and_preserves_surroundings(
        alphabet in alphabet_strategy(),
        growths in 1usize..6,
    ) {
        let (mut buf, mut field) = commit_with_field(&alphabet);
        for _ in 0..growths {
            let before = buf.content().to_vec();
            let grown = field::grow(&mut buf, field, &alphabet);

            prop_assert_eq!(grown.width(), field.width() + 1);
            prop_assert_eq!(
                alphabet.capacity(grown.width()),
                alphabet.capacity(field.width()).map(|c| c * alphabet.radix())
            );
            let after = buf.content();
            prop_assert_eq!(&after[..field.start()], &before[..field.start()]);
            prop_assert_eq!(
                &after[grown.start() + grown.width()..],
                &before[field.start() + field.width()..]
            );
            let header = format!("commit {}\0", after.len());
            prop_assert!(buf.as_bytes().starts_with(header.as_bytes()), "header {:?}", header);
            field = grown;
        }
    }
}
