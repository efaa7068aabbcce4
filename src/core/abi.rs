use crate::domain::model::ConstructorArg;
use crate::utils::error::{DeployError, Result};
use alloy_dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use alloy_json_abi::{Constructor, Param};
use alloy_primitives::Bytes;

fn abi_error(message: String) -> DeployError {
    DeployError::AbiError { message }
}

impl ConstructorArg {
    /// How the argument is written on a verification command line.
    pub fn to_cli_token(&self) -> String {
        match self {
            ConstructorArg::Uint(value) => value.to_string(),
            ConstructorArg::Address(address) => address.to_checksum(None),
            ConstructorArg::Bool(flag) => flag.to_string(),
            ConstructorArg::FixedBytes(bytes) => bytes.to_string(),
            ConstructorArg::Text(text) => text.clone(),
        }
    }

    /// The argument as a value of the parameter's Solidity type.
    fn to_sol_value(&self, param: &Param) -> Result<DynSolValue> {
        let ty: DynSolType = param.resolve().map_err(|e| {
            abi_error(format!("constructor parameter '{}': {}", param.name, e))
        })?;

        match (self, &ty) {
            (ConstructorArg::Uint(value), DynSolType::Uint(bits)) => {
                if value.bit_len() > *bits {
                    return Err(abi_error(format!(
                        "value {} for '{}' does not fit in uint{}",
                        value, param.name, bits
                    )));
                }
                Ok(DynSolValue::Uint(*value, *bits))
            }
            (ConstructorArg::Address(address), DynSolType::Address) => {
                Ok(DynSolValue::Address(*address))
            }
            (ConstructorArg::Bool(flag), DynSolType::Bool) => Ok(DynSolValue::Bool(*flag)),
            (ConstructorArg::FixedBytes(bytes), DynSolType::FixedBytes(32)) => {
                Ok(DynSolValue::FixedBytes(*bytes, 32))
            }
            (ConstructorArg::Text(text), DynSolType::String) => {
                Ok(DynSolValue::String(text.clone()))
            }
            _ => Err(abi_error(format!(
                "argument {:?} is not compatible with {} '{}'",
                self, param.ty, param.name
            ))),
        }
    }
}

/// ABI-encodes constructor arguments; a missing constructor takes none.
pub fn encode_constructor_args(
    constructor: Option<&Constructor>,
    args: &[ConstructorArg],
) -> Result<Vec<u8>> {
    let inputs: &[Param] = constructor.map(|c| c.inputs.as_slice()).unwrap_or_default();
    if inputs.len() != args.len() {
        return Err(abi_error(format!(
            "constructor expects {} argument(s), got {}",
            inputs.len(),
            args.len()
        )));
    }

    let Some(constructor) = constructor else {
        return Ok(Vec::new());
    };

    let values = inputs
        .iter()
        .zip(args)
        .map(|(param, arg)| arg.to_sol_value(param))
        .collect::<Result<Vec<_>>>()?;

    constructor
        .abi_encode_input(&values)
        .map_err(|e| abi_error(format!("encoding constructor arguments: {}", e)))
}

/// Creation bytecode followed by the encoded constructor arguments.
pub fn deployment_data(
    creation_code: &[u8],
    constructor: Option<&Constructor>,
    args: &[ConstructorArg],
) -> Result<Bytes> {
    let encoded_args = encode_constructor_args(constructor, args)?;
    let mut data = Vec::with_capacity(creation_code.len() + encoded_args.len());
    data.extend_from_slice(creation_code);
    data.extend_from_slice(&encoded_args);
    Ok(Bytes::from(data))
}
