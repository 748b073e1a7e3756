/// 在整数自变量 [i0, i1] 上线性插值因变量 d
///
/// `i0 == i1` 时只返回 `[d0]`；`i1 < i0` 时返回空列表
pub fn interpolate(i0: i32, d0: f32, i1: i32, d1: f32) -> Vec<f32> {
    if i0 == i1 {
        return vec![d0];
    }
    if i1 < i0 {
        return Vec::new();
    }

    let slope = (d1 - d0) / (i1 - i0) as f32;
    (0..=(i1 - i0)).map(|step| d0 + slope * step as f32).collect()
}

/// 三角形边插值：返回 (长边 0→2, 短边 0→1→2)
///
/// 两段短边在中间顶点处的重复值只保留一个，两个结果长度一致
pub fn edge_interpolate(
    y0: i32,
    v0: f32,
    y1: i32,
    v1: f32,
    y2: i32,
    v2: f32,
) -> (Vec<f32>, Vec<f32>) {
    let mut v01 = interpolate(y0, v0, y1, v1);
    let v12 = interpolate(y1, v1, y2, v2);
    let v02 = interpolate(y0, v0, y2, v2);

    v01.pop();
    v01.extend(v12);
    (v02, v01)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_range_yields_single_value() {
        assert_eq!(interpolate(5, 10.0, 5, 20.0), vec![10.0]);
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(interpolate(3, 1.0, 1, 2.0).is_empty());
    }

    #[test]
    fn endpoints_are_inclusive() {
        let values = interpolate(0, 0.0, 4, 8.0);
        assert_eq!(values.len(), 5);
        assert!((values[0] - 0.0).abs() < 1e-6);
        assert!((values[2] - 4.0).abs() < 1e-6);
        assert!((values[4] - 8.0).abs() < 1e-6);
    }

    #[test]
    fn edges_share_length() {
        let (long, short) = edge_interpolate(0, 0.0, 3, 30.0, 10, 0.0);
        assert_eq!(long.len(), 11);
        assert_eq!(short.len(), 11);
        assert!((short[3] - 30.0).abs() < 1e-4);
        assert!((long[10] - 0.0).abs() < 1e-4);
    }

    #[test]
    fn flat_top_edge_keeps_lengths_aligned() {
        // y0 == y1：短边第一段只有一个值，被 pop 后由第二段补齐
        let (long, short) = edge_interpolate(2, 1.0, 2, 5.0, 6, 9.0);
        assert_eq!(long.len(), 5);
        assert_eq!(short.len(), 5);
        assert!((short[0] - 5.0).abs() < 1e-6);
    }
}
