//! Some basic nom parsers for the numeric literals in scene documents.

use nom::{
    character::complete::{char, multispace0},
    combinator::{all_consuming, opt},
    number::complete::float,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use math3d::{Matrix4x4, Vector, Vector4};

// ========================================================

pub fn ws_f32(input: &str) -> IResult<&str, f32, ()> {
    delimited(multispace0, float, multispace0)(input)
}

fn comma_f32(input: &str) -> IResult<&str, f32, ()> {
    preceded(char(','), ws_f32)(input)
}

/// `x, y, z`
pub fn float3(input: &str) -> IResult<&str, [f32; 3], ()> {
    let (i, (x, y, z)) = tuple((ws_f32, comma_f32, comma_f32))(input)?;
    Ok((i, [x, y, z]))
}

/// `x, y, z, w`
pub fn float4(input: &str) -> IResult<&str, [f32; 4], ()> {
    let (i, (x, y, z, w)) = tuple((ws_f32, comma_f32, comma_f32, comma_f32))(input)?;
    Ok((i, [x, y, z, w]))
}

fn row_end(input: &str) -> IResult<&str, char, ()> {
    terminated(char(';'), multispace0)(input)
}

/// Four `;`-separated rows of four comma-separated floats.  A trailing
/// `;` after the last row is allowed.
pub fn float4x4(input: &str) -> IResult<&str, [[f32; 4]; 4], ()> {
    let (i, (r0, _, r1, _, r2, _, r3, _)) = tuple((
        float4,
        row_end,
        float4,
        row_end,
        float4,
        row_end,
        float4,
        opt(row_end),
    ))(input)?;
    Ok((i, [r0, r1, r2, r3]))
}

//---------------------------------------------------------

pub fn parse_scalar(text: &str) -> Result<f32, ()> {
    all_consuming(ws_f32)(text)
        .map(|(_, n)| n)
        .map_err(|_| ())
}

pub fn parse_vector(text: &str) -> Result<Vector, ()> {
    all_consuming(float3)(text)
        .map(|(_, v)| Vector::from(v))
        .map_err(|_| ())
}

pub fn parse_vector4(text: &str) -> Result<Vector4, ()> {
    all_consuming(float4)(text)
        .map(|(_, v)| Vector4::from(v))
        .map_err(|_| ())
}

/// Parses a row-major matrix literal.
pub fn parse_matrix(text: &str) -> Result<Matrix4x4, ()> {
    all_consuming(float4x4)(text)
        .map(|(_, rows)| Matrix4x4::from_rows(rows))
        .map_err(|_| ())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ws_f32_1() {
        assert_eq!(ws_f32("42"), Ok((&""[..], 42.0)));
        assert_eq!(ws_f32("  42.0"), Ok((&""[..], 42.0)));
        assert_eq!(ws_f32("42.5  "), Ok((&""[..], 42.5)));
        assert_eq!(ws_f32("  -42.25  "), Ok((&""[..], -42.25)));
        assert_eq!(ws_f32("  42.0  53"), Ok((&"53"[..], 42.0)));
        assert!(ws_f32("abc").is_err());
    }

    #[test]
    fn float3_1() {
        assert_eq!(float3("1,2,3"), Ok((&""[..], [1.0, 2.0, 3.0])));
        assert_eq!(float3(" 1 , 2.5 ,-3 "), Ok((&""[..], [1.0, 2.5, -3.0])));
        assert_eq!(float3("1,2,3,4"), Ok((&",4"[..], [1.0, 2.0, 3.0])));
        assert!(float3("1,2").is_err());
    }

    #[test]
    fn parse_vector_literal() {
        assert_eq!(parse_vector("1.5,2.5,3.5"), Ok(Vector::new(1.5, 2.5, 3.5)));
        assert_eq!(parse_vector("0, 0, -10"), Ok(Vector::new(0.0, 0.0, -10.0)));
        assert_eq!(parse_vector("1,2,3,4"), Err(()));
        assert_eq!(parse_vector("1,x,3"), Err(()));
        assert_eq!(parse_vector(""), Err(()));
    }

    #[test]
    fn parse_vector4_literal() {
        assert_eq!(
            parse_vector4("1,0,0,1"),
            Ok(Vector4::new(1.0, 0.0, 0.0, 1.0))
        );
        assert_eq!(parse_vector4("1,0,0"), Err(()));
    }

    #[test]
    fn parse_scalar_literal() {
        assert_eq!(parse_scalar(" 0.25 "), Ok(0.25));
        assert_eq!(parse_scalar("1e2"), Ok(100.0));
        assert_eq!(parse_scalar("0.25 0.5"), Err(()));
    }

    #[test]
    fn parse_identity_matrix() {
        let m = parse_matrix("1,0,0,0; 0,1,0,0; 0,0,1,0; 0,0,0,1");
        assert_eq!(m, Ok(Matrix4x4::new()));

        let m = parse_matrix("1,0,0,0;\n0,1,0,0;\n0,0,1,0;\n0,0,0,1;\n");
        assert_eq!(m, Ok(Matrix4x4::new()));
    }

    #[test]
    fn parse_matrix_is_row_major() {
        let m = parse_matrix("1,0,0,5; 0,1,0,6; 0,0,1,7; 0,0,0,1").unwrap();
        assert_eq!(m.translation(), Vector::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn parse_matrix_errors() {
        assert!(parse_matrix("1,0,0,0; 0,1,0,0; 0,0,1,0").is_err());
        assert!(parse_matrix("1,0,0; 0,1,0; 0,0,1; 0,0,0").is_err());
        assert!(parse_matrix("1,0,0,0; 0,1,0,0; 0,0,1,0; 0,0,0,1; 9").is_err());
    }
}
