// Test utilities for building synthetic Hugo story images without a compiler
use crate::header::{
    ADDRESSES_OFFSET, ARRAYTABLE_OFFSET, BLOCK_SIZE, CODESTART_OFFSET, DEBUG_FLAG_OFFSET,
    DEBUG_START_OFFSET, DICTTABLE_OFFSET, EVENTTABLE_OFFSET, ID_OFFSET, OBJTABLE_OFFSET,
    PROPTABLE_OFFSET, SERIAL_OFFSET, SPECWORDTABLE_OFFSET, SUPPORTED_VERSION, TEXTBANK_OFFSET,
};
use crate::grammar::GRAMMAR_START;
use crate::util::CHAR_OFFSET;

/// One object record plus the raw override stream for it (terminator added on build).
#[derive(Debug, Clone, Default)]
pub struct ObjectSpec {
    pub attributes: [u8; 16],
    pub parent: u16,
    pub sibling: u16,
    pub child: u16,
    pub overrides: Vec<u8>,
}

impl ObjectSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(mut self, parent: u16, sibling: u16, child: u16) -> Self {
        self.parent = parent;
        self.sibling = sibling;
        self.child = child;
        self
    }

    pub fn attribute(mut self, n: usize) -> Self {
        self.attributes[n / 8] |= 1 << (n % 8);
        self
    }

    pub fn routine(mut self, prop: u8, addr: u16) -> Self {
        self.overrides.extend([prop, 0xff]);
        self.overrides.extend(addr.to_le_bytes());
        self
    }

    pub fn words(mut self, prop: u8, words: &[u16]) -> Self {
        self.overrides.extend([prop, words.len() as u8]);
        for w in words {
            self.overrides.extend(w.to_le_bytes());
        }
        self
    }

    pub fn zeroed(mut self, prop: u8) -> Self {
        self.overrides.extend([prop, 0]);
        self
    }
}

pub struct StoryImageBuilder {
    version: u8,
    id: u16,
    serial: [u8; 8],
    grammar: Vec<u8>,
    code: Vec<u8>,
    property_defaults: Vec<u16>,
    objects: Vec<ObjectSpec>,
    events: Vec<(u16, u16)>,
    globals: Vec<u16>,
    arrays: Vec<Vec<u16>>,
    special_words: Vec<(u8, u16, u16)>,
    dictionary: Vec<String>,
    textbank: Vec<String>,
    debug_data: Option<Vec<u8>>,
}

impl Default for StoryImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryImageBuilder {
    pub fn new() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            id: 0x1234,
            serial: *b"01-02-03",
            grammar: Vec::new(),
            code: Vec::new(),
            property_defaults: Vec::new(),
            objects: Vec::new(),
            events: Vec::new(),
            globals: Vec::new(),
            arrays: Vec::new(),
            special_words: Vec::new(),
            dictionary: Vec::new(),
            textbank: Vec::new(),
            debug_data: None,
        }
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn serial(mut self, serial: &[u8; 8]) -> Self {
        self.serial = *serial;
        self
    }

    /// Raw grammar table bytes; the 0xff terminator is appended on build.
    pub fn grammar(mut self, grammar: &[u8]) -> Self {
        self.grammar = grammar.to_vec();
        self
    }

    pub fn code(mut self, code: &[u8]) -> Self {
        self.code = code.to_vec();
        self
    }

    pub fn property_defaults(mut self, defaults: &[u16]) -> Self {
        self.property_defaults = defaults.to_vec();
        self
    }

    pub fn object(mut self, object: ObjectSpec) -> Self {
        self.objects.push(object);
        self
    }

    pub fn event(mut self, obj: u16, addr: u16) -> Self {
        self.events.push((obj, addr));
        self
    }

    pub fn global(mut self, index: usize, value: u16) -> Self {
        if self.globals.len() <= index {
            self.globals.resize(index + 1, 0);
        }
        self.globals[index] = value;
        self
    }

    pub fn array(mut self, contents: &[u16]) -> Self {
        self.arrays.push(contents.to_vec());
        self
    }

    pub fn special_word(mut self, category: u8, addr1: u16, addr2: u16) -> Self {
        self.special_words.push((category, addr1, addr2));
        self
    }

    pub fn word(mut self, word: &str) -> Self {
        self.dictionary.push(word.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.textbank.push(text.to_string());
        self
    }

    pub fn debug_data(mut self, data: &[u8]) -> Self {
        self.debug_data = Some(data.to_vec());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut image = vec![0u8; GRAMMAR_START];
        image[0] = self.version;
        put_word(&mut image, ID_OFFSET, self.id);
        image[SERIAL_OFFSET..SERIAL_OFFSET + 8].copy_from_slice(&self.serial);

        image.extend(&self.grammar);
        image.push(0xff);

        let codestart = image.len();
        image.extend(&self.code);
        align(&mut image);

        let objtable = image.len();
        push_word(&mut image, self.objects.len() as u16);
        let object_records = image.len();
        image.resize(object_records + self.objects.len() * 24, 0);
        align(&mut image);

        let proptable = image.len();
        push_word(&mut image, self.property_defaults.len() as u16);
        for d in &self.property_defaults {
            push_word(&mut image, *d);
        }
        for (i, obj) in self.objects.iter().enumerate() {
            let record = object_records + i * 24;
            image[record..record + 16].copy_from_slice(&obj.attributes);
            put_word(&mut image, record + 16, obj.parent);
            put_word(&mut image, record + 18, obj.sibling);
            put_word(&mut image, record + 20, obj.child);
            let stream = (image.len() - proptable) as u16;
            put_word(&mut image, record + 22, stream);
            image.extend(&obj.overrides);
            image.push(0xff);
        }
        align(&mut image);

        let eventtable = image.len();
        push_word(&mut image, self.events.len() as u16);
        for (obj, addr) in &self.events {
            push_word(&mut image, *obj);
            push_word(&mut image, *addr);
        }
        align(&mut image);

        let arraytable = image.len();
        let mut globals = self.globals.clone();
        globals.resize(240, 0);
        for g in globals {
            push_word(&mut image, g);
        }
        for array in &self.arrays {
            push_word(&mut image, array.len() as u16);
            for w in array {
                push_word(&mut image, *w);
            }
        }
        align(&mut image);

        let specwordtable = image.len();
        push_word(&mut image, self.special_words.len() as u16);
        for (category, addr1, addr2) in &self.special_words {
            image.push(*category);
            push_word(&mut image, *addr1);
            push_word(&mut image, *addr2);
        }
        align(&mut image);

        let dicttable = image.len();
        push_word(&mut image, self.dictionary.len() as u16);
        for word in &self.dictionary {
            image.push(word.len() as u8);
            image.extend(encode(word));
        }
        align(&mut image);

        let textbank = image.len();
        for text in &self.textbank {
            push_word(&mut image, text.len() as u16);
            image.extend(encode(text));
        }

        if let Some(data) = &self.debug_data {
            let debug_start = image.len();
            image[DEBUG_FLAG_OFFSET] = 1;
            image[DEBUG_START_OFFSET] = debug_start as u8;
            image[DEBUG_START_OFFSET + 1] = (debug_start >> 8) as u8;
            image[DEBUG_START_OFFSET + 2] = (debug_start >> 16) as u8;
            image.extend(data);
        }

        put_word(&mut image, CODESTART_OFFSET, codestart as u16);
        put_block(&mut image, OBJTABLE_OFFSET, objtable);
        put_block(&mut image, PROPTABLE_OFFSET, proptable);
        put_block(&mut image, EVENTTABLE_OFFSET, eventtable);
        put_block(&mut image, ARRAYTABLE_OFFSET, arraytable);
        put_block(&mut image, DICTTABLE_OFFSET, dicttable);
        put_block(&mut image, SPECWORDTABLE_OFFSET, specwordtable);
        put_block(&mut image, TEXTBANK_OFFSET, textbank);
        for i in 0..8 {
            put_word(&mut image, ADDRESSES_OFFSET + i * 2, (i as u16 + 1) * 0x10);
        }

        image
    }
}

pub fn encode(text: &str) -> Vec<u8> {
    text.bytes().map(|b| (b as i32 + CHAR_OFFSET) as u8).collect()
}

pub fn put_word(image: &mut [u8], offset: usize, word: u16) {
    image[offset..offset + 2].copy_from_slice(&word.to_le_bytes());
}

fn put_block(image: &mut [u8], offset: usize, byte_offset: usize) {
    put_word(image, offset, (byte_offset / BLOCK_SIZE) as u16);
}

fn push_word(image: &mut Vec<u8>, word: u16) {
    image.extend(word.to_le_bytes());
}

fn align(image: &mut Vec<u8>) {
    while image.len() % BLOCK_SIZE != 0 {
        image.push(0);
    }
}
