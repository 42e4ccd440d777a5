use chrono::NaiveDate;

// Verhoeff dihedral-group tables
const MULTIPLICATION: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const PERMUTATION: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// True for a 12-digit ID number that cannot start with 0 or 1 and whose
/// trailing Verhoeff check digit is correct.
pub fn is_valid_id_checksum(number: &str) -> bool {
    if number.len() != 12 || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if number.starts_with('0') || number.starts_with('1') {
        return false;
    }
    let check = number
        .bytes()
        .rev()
        .enumerate()
        .fold(0u8, |acc, (position, byte)| {
            let digit = (byte - b'0') as usize;
            MULTIPLICATION[acc as usize][PERMUTATION[position % 8][digit] as usize]
        });
    check == 0
}

/// True for a real calendar date written DD/MM/YYYY or DD-MM-YYYY.
pub fn is_valid_date(date: &str) -> bool {
    ["%d/%m/%Y", "%d-%m-%Y"]
        .iter()
        .any(|format| date.len() == 10 && NaiveDate::parse_from_str(date, format).is_ok())
}
