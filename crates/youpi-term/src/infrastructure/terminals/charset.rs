/// Folds `text` into the 7-bit character set of the Minitel serial line.
///
/// Accented Latin letters lose their diacritic and typographic quotes become
/// plain ones. Anything else outside ASCII is shown as `?`. Every character
/// maps to exactly one byte, so widths computed on `text` still hold.
pub fn to_line_charset(text: &str) -> String {
    return text.chars().map(fold).collect();
}

fn fold(c: char) -> char {
    if c.is_ascii() {
        return c;
    }

    match c {
        'à' | 'â' | 'ä' | 'á' => return 'a',
        'À' | 'Â' | 'Ä' | 'Á' => return 'A',
        'é' | 'è' | 'ê' | 'ë' => return 'e',
        'É' | 'È' | 'Ê' | 'Ë' => return 'E',
        'î' | 'ï' | 'í' => return 'i',
        'Î' | 'Ï' | 'Í' => return 'I',
        'ô' | 'ö' | 'ó' => return 'o',
        'Ô' | 'Ö' | 'Ó' => return 'O',
        'ù' | 'û' | 'ü' | 'ú' => return 'u',
        'Ù' | 'Û' | 'Ü' | 'Ú' => return 'U',
        'ç' => return 'c',
        'Ç' => return 'C',
        'ÿ' => return 'y',
        '’' | '‘' => return '\'',
        '«' | '»' | '“' | '”' => return '"',
        '\u{a0}' => return ' ',
        _ => return '?',
    }
}
