// Hand-laid story image shared by the integration tests.
//
//   0x000  header
//   0x040  grammar
//   0x050  code
//   0x060  objects (2)
//   0x0a0  properties (4 defaults + 2 streams)
//   0x0c0  events (1)
//   0x0d0  arrays (globals + 1 array)
//   0x2d0  special words (2)
//   0x2e0  dictionary (3 words)
//   0x300  text bank (2 strings)

#![allow(dead_code)]

pub const IFID: &str = "0F1E2D3C-4B5A-6978-8796-A5B4C3D2E1F0";

const CODE: usize = 0x50;
const OBJECTS: usize = 0x60;
const PROPERTIES: usize = 0xa0;
const EVENTS: usize = 0xc0;
const ARRAYS: usize = 0xd0;
const SPECIAL_WORDS: usize = 0x2d0;
const DICTIONARY: usize = 0x2e0;
const TEXTBANK: usize = 0x300;

fn put(image: &mut Vec<u8>, offset: usize, bytes: &[u8]) {
    if image.len() < offset + bytes.len() {
        image.resize(offset + bytes.len(), 0);
    }
    image[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn put_word(image: &mut Vec<u8>, offset: usize, word: u16) {
    put(image, offset, &word.to_le_bytes());
}

fn text(s: &str) -> Vec<u8> {
    s.bytes().map(|b| b + 20).collect()
}

pub fn story_image() -> Vec<u8> {
    let mut image = vec![0u8; 0x40];
    image[0] = 31;
    put_word(&mut image, 0x01, 0x0bad);
    put(&mut image, 0x03, b"02-14-05");
    put_word(&mut image, 0x0b, CODE as u16);
    for (i, offset) in [OBJECTS, PROPERTIES, EVENTS, ARRAYS, DICTIONARY, SPECIAL_WORDS]
        .iter()
        .enumerate()
    {
        put_word(&mut image, 0x0d + i * 2, (*offset / 16) as u16);
    }
    for i in 0..8 {
        put_word(&mut image, 0x19 + i * 2, 0x100 + i as u16);
    }
    put_word(&mut image, 0x29, (TEXTBANK / 16) as u16);

    // grammar: verb "look" with one empty line and one two-token line
    put(
        &mut image,
        0x40,
        &[0x2c, 0x01, 0x09, 0x00, 0x08, 0x01, 0x08, 0x03, 0x0e, 0x0f, 0xff],
    );

    put(&mut image, CODE, &[0x4b, 0x00, 0x11, 0x22]);

    // objects
    put_word(&mut image, OBJECTS, 2);
    let first = OBJECTS + 2;
    image.resize(first + 48, 0);
    image[first] = 0b1000_0001; // known, open
    put_word(&mut image, first + 20, 1); // child
    put_word(&mut image, first + 22, 10); // property stream
    let second = first + 24;
    image[second + 3] = 0b0000_0010; // custom (25)
    put_word(&mut image, second + 22, 20);

    // four defaults, then the streams
    put_word(&mut image, PROPERTIES, 4);
    for (i, d) in [0u16, 0xfffb, 7, 9].iter().enumerate() {
        put_word(&mut image, PROPERTIES + 2 + i * 2, *d);
    }
    // object 0: routine in property 2
    put(&mut image, PROPERTIES + 10, &[0x02, 0xff, 0x00, 0x20, 0xff]);
    // object 1: named "lamp", property 3 zeroed, property 1 set to 0xfffe
    put(
        &mut image,
        PROPERTIES + 20,
        &[0x00, 0x01, 0x04, 0x00, 0x03, 0x00, 0x01, 0x01, 0xfe, 0xff, 0xff],
    );

    put_word(&mut image, EVENTS, 1);
    put_word(&mut image, EVENTS + 2, 1);
    put_word(&mut image, EVENTS + 4, 0x0300);

    // globals fill the first 480 bytes
    put_word(&mut image, ARRAYS, 0x8000);
    put_word(&mut image, ARRAYS + 2, 42);
    put_word(&mut image, ARRAYS + 480, 3);
    put_word(&mut image, ARRAYS + 482, 1);
    put_word(&mut image, ARRAYS + 484, 2);
    put_word(&mut image, ARRAYS + 486, 3);
    image.resize(SPECIAL_WORDS, 0);

    put_word(&mut image, SPECIAL_WORDS, 2);
    put(&mut image, SPECIAL_WORDS + 2, &[0x00, 0x04, 0x00, 0x09, 0x00]);
    put(&mut image, SPECIAL_WORDS + 7, &[0x01, 0x00, 0x00, 0x00, 0x00]);
    image.resize(DICTIONARY, 0);

    // "the" at 0, "lamp" at 4, "look" at 9
    put_word(&mut image, DICTIONARY, 3);
    let mut ptr = DICTIONARY + 2;
    for w in ["the", "lamp", "look"] {
        image.resize(ptr, 0);
        image.push(w.len() as u8);
        image.extend(text(w));
        ptr = image.len();
    }
    image.resize(TEXTBANK, 0);

    for s in ["A brass lamp.", &format!("IFID {}", IFID)] {
        image.extend((s.len() as u16).to_le_bytes());
        image.extend(text(s));
    }

    image
}
