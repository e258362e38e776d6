#![no_main]
use libfuzzer_sys::fuzz_target;

use cpiofs_core::{CpioFs, Whence};

fn walk(fs: &CpioFs, path: &[u8], budget: &mut usize) {
    if *budget == 0 {
        return;
    }
    *budget -= 1;
    let mut dir = match fs.open_dir(path) {
        Ok(dir) => dir,
        Err(_) => return,
    };
    // Unordered archives may list the same entry more than once
    while let Some(info) = dir.next() {
        if *budget == 0 {
            break;
        }
        *budget -= 1;
        if info.is_dir() && info.path != path {
            walk(fs, info.path, budget);
        } else if let Ok(mut file) = fs.open_file(info.path) {
            let mut buf = [0; 64];
            while let Ok(n) = file.read(&mut buf) {
                if n == 0 {
                    break;
                }
            }
            let _ = file.seek(-1, Whence::End);
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let fs = CpioFs::new(data);
    for entry in fs.entries() {
        let _ = (entry.name_bytes(), entry.data());
    }
    walk(&fs, b"./", &mut 256);
    assert_eq!(fs.open_count(), 0);
});
