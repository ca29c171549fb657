use super::WeakDomPtr;

/// <https://dom.spec.whatwg.org/#concept-document-quirks>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QuirksMode {
    #[default]
    NoQuirks,
    LimitedQuirks,
    Quirks,
}

/// <https://html.spec.whatwg.org/multipage/dom.html#current-document-readiness>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DocumentReadiness {
    #[default]
    Loading,
    Complete,
}

/// <https://dom.spec.whatwg.org/#interface-document>
#[derive(Default)]
pub struct Document {
    /// <https://html.spec.whatwg.org/multipage/parsing.html#the-head-element-pointer>
    ///
    /// The first `head` element ever inserted into this document.
    head: Option<WeakDomPtr>,

    /// The first `body` element ever inserted into this document.
    body: Option<WeakDomPtr>,

    quirks_mode: QuirksMode,

    /// <https://html.spec.whatwg.org/multipage/webappapis.html#concept-n-script>
    ///
    /// Off by default; script contents are still tokenized as script data
    /// but nothing executes.
    scripting_enabled: bool,

    readiness: DocumentReadiness,
}

impl Document {
    #[must_use]
    pub fn head(&self) -> Option<super::DomPtr> {
        self.head.as_ref()?.upgrade()
    }

    pub fn set_head(&mut self, head: WeakDomPtr) {
        if self.head.is_none() {
            self.head = Some(head);
        }
    }

    #[must_use]
    pub fn body(&self) -> Option<super::DomPtr> {
        self.body.as_ref()?.upgrade()
    }

    pub fn set_body(&mut self, body: WeakDomPtr) {
        if self.body.is_none() {
            self.body = Some(body);
        }
    }

    #[must_use]
    pub fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    pub fn set_quirks_mode(&mut self, quirks_mode: QuirksMode) {
        self.quirks_mode = quirks_mode;
    }

    #[must_use]
    pub fn scripting_enabled(&self) -> bool {
        self.scripting_enabled
    }

    pub fn set_scripting_enabled(&mut self, enabled: bool) {
        self.scripting_enabled = enabled;
    }

    #[must_use]
    pub fn readiness(&self) -> DocumentReadiness {
        self.readiness
    }

    pub fn set_readiness(&mut self, readiness: DocumentReadiness) {
        self.readiness = readiness;
    }
}
