use string_interner::InternedString;

/// <https://dom.spec.whatwg.org/#interface-documenttype>
///
/// Empty identifiers mean "missing".
#[derive(Default)]
pub struct DocumentType {
    name: InternedString,
    public_id: InternedString,
    system_id: InternedString,
}

impl DocumentType {
    pub fn new(
        name: InternedString,
        public_id: InternedString,
        system_id: InternedString,
    ) -> Self {
        Self {
            name,
            public_id,
            system_id,
        }
    }

    #[must_use]
    pub fn name(&self) -> InternedString {
        self.name
    }

    #[must_use]
    pub fn public_id(&self) -> InternedString {
        self.public_id
    }

    #[must_use]
    pub fn system_id(&self) -> InternedString {
        self.system_id
    }
}
