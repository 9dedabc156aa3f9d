use sha2::{Digest, Sha256};

/// 64 位有符号 varint 编码的最大字节数
const VARINT_MAX_LEN: usize = 10;

/// 从整数种子派生稳定的标识符字符串
///
/// 将种子按 zigzag varint 编码写入固定 10 字节缓冲区（尾部补零），
/// 对整个缓冲区计算 SHA-256，输出小写十六进制。相同种子永远得到
/// 相同输出；不同种子仅靠摘要的抗碰撞性区分，不保证全局唯一。
pub fn hash_seed(seed: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(encode_seed(seed));
    hex::encode(hasher.finalize())
}

/// zigzag varint 编码，固定宽度输出
fn encode_seed(seed: i64) -> [u8; VARINT_MAX_LEN] {
    let mut buf = [0u8; VARINT_MAX_LEN];
    let mut value = ((seed as u64) << 1) ^ ((seed >> 63) as u64);
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    buf
}
