use rand::Rng;

// 临时密码字符集，去掉了易混淆的 0/O/1/l/I
const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";

/// 生成指定长度的随机码（用于临时密码）
///
/// 末尾强制附加一位字母和一位数字，保证通过密码强度校验。
pub fn generate_random_code(length: usize) -> String {
    let mut rng = rand::rng();
    let body_len = length.saturating_sub(2);
    let mut code: String = (0..body_len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    let letters = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
    let digits = b"23456789";
    code.push(letters[rng.random_range(0..letters.len())] as char);
    code.push(digits[rng.random_range(0..digits.len())] as char);
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_generate_random_code_length() {
        assert_eq!(generate_random_code(12).len(), 12);
        assert_eq!(generate_random_code(2).len(), 2);
    }

    #[test]
    fn test_generated_code_passes_password_policy() {
        for _ in 0..16 {
            let code = generate_random_code(12);
            assert!(validate_password(&code).is_ok(), "weak code: {code}");
        }
    }

    #[test]
    fn test_codes_differ() {
        let a = generate_random_code(16);
        let b = generate_random_code(16);
        assert_ne!(a, b);
    }
}
